//! # daylapse-core
//!
//! daylapse 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] : 도메인 데이터 구조체 (프레임 이름 규칙, 윈도우, 비디오)
//! - [`ports`] : Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`] : 핵심 에러 타입 (thiserror)
//! - [`config`] : 애플리케이션 설정 구조체
//! - [`config_manager`] : 설정 파일 관리 (로드/저장)
//! - [`runner`] : 기본 외부 명령 러너 (tokio::process)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;
pub mod runner;

#[cfg(test)]
mod tests {
    use crate::models::frame;
    use crate::models::video::AssembledVideo;
    use std::path::PathBuf;

    #[test]
    fn assembled_video_serde_roundtrip() {
        let video = AssembledVideo {
            path: PathBuf::from("./videos/20240305_timelapse.mp4"),
            title: "Timelapse for Tuesday March 05, 2024".to_string(),
        };

        let json = serde_json::to_string(&video).unwrap();
        let deserialized: AssembledVideo = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.path, video.path);
        assert_eq!(deserialized.title, video.title);
    }

    #[test]
    fn frame_naming_roundtrip() {
        // 파일명을 만들었다가 다시 파싱하면 같은 번호여야 한다
        let paths = frame::frame_paths(std::path::Path::new("/tmp"), 77);
        let name = paths.annotated.file_name().unwrap().to_str().unwrap();
        assert_eq!(frame::parse_sequence(name), Some(77));
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert_eq!(config.capture.interval_secs, 30);
        assert_eq!(config.capture.frame_width, 1280);
        assert_eq!(config.capture.frame_height, 1024);
        assert_eq!(config.schedule.cutoff_hour, 2);
        assert!(!config.publish.enabled);
    }
}
