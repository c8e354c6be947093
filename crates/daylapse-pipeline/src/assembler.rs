//! 비디오 조립.
//!
//! ffmpeg를 호출해 하루치 주석 프레임(`image_%05d.jpg`)을
//! 타임랩스 MP4로 인코딩한다. 성공 판정은 ffmpeg 종료 코드다.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::fs;
use tracing::{debug, info};

use daylapse_core::error::CoreError;
use daylapse_core::models::frame;
use daylapse_core::models::video::{self, AssembledVideo};
use daylapse_core::ports::runner::CommandRunner;

/// 인코딩에 쓰는 외부 프로그램
const ENCODER_PROGRAM: &str = "ffmpeg";

/// 출력 프레임레이트 (fps)
const FRAME_RATE: u32 = 20;

/// MJPEG 품질 스케일 (2 = 고품질)
const QUALITY: u32 = 2;

/// 비디오 조립기 — ffmpeg 기반
pub struct VideoAssembler {
    runner: Arc<dyn CommandRunner>,
    image_dir: PathBuf,
    video_dir: PathBuf,
}

impl VideoAssembler {
    /// 새 조립기 생성
    pub fn new(runner: Arc<dyn CommandRunner>, image_dir: PathBuf, video_dir: PathBuf) -> Self {
        Self {
            runner,
            image_dir,
            video_dir,
        }
    }

    /// 세션 프레임 전체를 하루치 타임랩스로 인코딩
    ///
    /// `date`는 세션 시작 날짜로, 출력 파일명과 제목에 쓰인다.
    /// 같은 날짜의 기존 출력은 덮어쓴다.
    pub async fn assemble(&self, date: NaiveDate) -> Result<AssembledVideo, CoreError> {
        fs::create_dir_all(&self.video_dir).await?;

        let output = video::output_path(&self.video_dir, date);
        let pattern = frame::encoder_input(&self.image_dir);

        let args = vec![
            "-f".to_string(),
            "image2".to_string(),
            "-r".to_string(),
            FRAME_RATE.to_string(),
            "-i".to_string(),
            pattern.to_string_lossy().into_owned(),
            "-q:v".to_string(),
            QUALITY.to_string(),
            "-y".to_string(),
            output.to_string_lossy().into_owned(),
        ];

        debug!("ffmpeg 실행: {}", args.join(" "));

        let outcome = self
            .runner
            .run(ENCODER_PROGRAM, &args)
            .await
            .map_err(|e| CoreError::Encode(format!("ffmpeg 실행 실패: {e}")))?;

        if !outcome.success {
            return Err(CoreError::Encode(format!(
                "ffmpeg 비정상 종료: {}",
                outcome.stderr.trim()
            )));
        }

        let assembled = AssembledVideo {
            path: output,
            title: video::title_for(date),
        };
        info!("비디오 조립 완료: {}", assembled.path.display());
        Ok(assembled)
    }
}
