//! 애플리케이션 설정 구조체.
//!
//! 이미지/비디오 디렉토리, 캡처 해상도와 간격, 타임존,
//! 일일 컷오프 시각, 업로드 활성화 여부를 정의한다.
//! `config_manager`를 통해 JSON 파일에서 로드/저장.

use crate::error::CoreError;
use crate::models::frame::FrameSize;
use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 캡처 설정
    #[serde(default)]
    pub capture: CaptureConfig,
    /// 비디오 출력 설정
    #[serde(default)]
    pub video: VideoConfig,
    /// 윈도우 스케줄 설정
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// 업로드 설정
    #[serde(default)]
    pub publish: PublishConfig,
}

// ============================================================
// 캡처 설정
// ============================================================

/// 캡처 설정: 이미지 디렉토리, 해상도, 간격, 타임존
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// 프레임 이미지 저장 디렉토리
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
    /// 캡처 해상도 가로 (픽셀)
    #[serde(default = "default_frame_width")]
    pub frame_width: u32,
    /// 캡처 해상도 세로 (픽셀)
    #[serde(default = "default_frame_height")]
    pub frame_height: u32,
    /// 캡처 간격 (초)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// 타임스탬프 라벨용 IANA 타임존 (예: "Europe/Amsterdam")
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl CaptureConfig {
    /// 설정된 캡처 해상도 반환
    pub fn frame_size(&self) -> FrameSize {
        FrameSize {
            width: self.frame_width,
            height: self.frame_height,
        }
    }

    /// 타임존 문자열을 파싱하여 반환
    pub fn parsed_timezone(&self) -> Result<Tz, CoreError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| CoreError::Config(format!("알 수 없는 타임존: {}", self.timezone)))
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            image_dir: default_image_dir(),
            frame_width: default_frame_width(),
            frame_height: default_frame_height(),
            interval_secs: default_interval_secs(),
            timezone: default_timezone(),
        }
    }
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("./webcam_images")
}

fn default_frame_width() -> u32 {
    1280
}

fn default_frame_height() -> u32 {
    1024
}

fn default_interval_secs() -> u64 {
    30
}

fn default_timezone() -> String {
    "Europe/Amsterdam".to_string()
}

// ============================================================
// 비디오 출력 설정
// ============================================================

/// 비디오 출력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// 인코딩된 비디오 저장 디렉토리
    #[serde(default = "default_video_dir")]
    pub video_dir: PathBuf,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            video_dir: default_video_dir(),
        }
    }
}

fn default_video_dir() -> PathBuf {
    PathBuf::from("./videos")
}

// ============================================================
// 윈도우 스케줄 설정
// ============================================================

/// 윈도우 스케줄 설정: 캡처 윈도우가 끝나는 일일 컷오프 시각
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// 컷오프 시 (0-23)
    #[serde(default = "default_cutoff_hour")]
    pub cutoff_hour: u8,
    /// 컷오프 분 (0-59)
    #[serde(default)]
    pub cutoff_minute: u8,
}

impl ScheduleConfig {
    /// 컷오프 시각 반환 (범위 밖 값은 클램핑)
    pub fn cutoff_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(
            u32::from(self.cutoff_hour.min(23)),
            u32::from(self.cutoff_minute.min(59)),
            0,
        )
        .unwrap_or(NaiveTime::MIN)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cutoff_hour: default_cutoff_hour(),
            cutoff_minute: 0,
        }
    }
}

fn default_cutoff_hour() -> u8 {
    2
}

// ============================================================
// 업로드 설정
// ============================================================

/// 업로드 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishConfig {
    /// 인코딩 완료 후 외부 업로드 명령 실행 여부
    #[serde(default)]
    pub enabled: bool,
}

// Default: enabled = false (derive로 자동 생성)

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            capture: CaptureConfig::default(),
            video: VideoConfig::default(),
            schedule: ScheduleConfig::default(),
            publish: PublishConfig::default(),
        }
    }

    /// 설정값 유효성 검증
    ///
    /// 캡처 간격/해상도가 0이 아니고 타임존이 파싱 가능한지 확인한다.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.capture.interval_secs == 0 {
            return Err(CoreError::Config("캡처 간격은 0일 수 없습니다".to_string()));
        }
        if self.capture.frame_width == 0 || self.capture.frame_height == 0 {
            return Err(CoreError::Config(format!(
                "잘못된 캡처 해상도: {}x{}",
                self.capture.frame_width, self.capture.frame_height
            )));
        }
        if self.schedule.cutoff_hour > 23 || self.schedule.cutoff_minute > 59 {
            return Err(CoreError::Config(format!(
                "잘못된 컷오프 시각: {:02}:{:02}",
                self.schedule.cutoff_hour, self.schedule.cutoff_minute
            )));
        }
        self.capture.parsed_timezone()?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let config = AppConfig::default_config();
        assert_eq!(config.capture.image_dir, PathBuf::from("./webcam_images"));
        assert_eq!(config.capture.frame_width, 1280);
        assert_eq!(config.capture.frame_height, 1024);
        assert_eq!(config.capture.interval_secs, 30);
        assert_eq!(config.capture.timezone, "Europe/Amsterdam");
        assert_eq!(config.video.video_dir, PathBuf::from("./videos"));
        assert_eq!(config.schedule.cutoff_hour, 2);
        assert_eq!(config.schedule.cutoff_minute, 0);
        assert!(!config.publish.enabled);
    }

    #[test]
    fn validate_default_config() {
        assert!(AppConfig::default_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let mut config = AppConfig::default_config();
        config.capture.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_timezone() {
        let mut config = AppConfig::default_config();
        config.capture.timezone = "Mars/Olympus_Mons".to_string();
        let err = config.validate().unwrap_err();
        assert!(format!("{err}").contains("타임존"));
    }

    #[test]
    fn cutoff_time_from_fields() {
        let schedule = ScheduleConfig {
            cutoff_hour: 2,
            cutoff_minute: 30,
        };
        assert_eq!(
            schedule.cutoff_time(),
            NaiveTime::from_hms_opt(2, 30, 0).unwrap()
        );
    }

    #[test]
    fn empty_json_falls_back_to_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.capture.interval_secs, 30);
        assert_eq!(config.schedule.cutoff_hour, 2);
        assert!(!config.publish.enabled);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let json = r#"{"capture": {"interval_secs": 5}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.capture.interval_secs, 5);
        assert_eq!(config.capture.frame_width, 1280);
        assert_eq!(config.capture.timezone, "Europe/Amsterdam");
    }
}
