//! Cross-crate 에러 경로 테스트.
//!
//! 시퀀스 복원, 주석, 조립, 게시 등 크레이트 경계에서의
//! 에러 종류와 메시지 전파를 검증한다.

use assert_matches::assert_matches;
use async_trait::async_trait;
use std::sync::Arc;
use tempfile::TempDir;

use daylapse_capture::annotator::MontageAnnotator;
use daylapse_capture::sequencer;
use daylapse_core::config::AppConfig;
use daylapse_core::error::CoreError;
use daylapse_core::models::video::AssembledVideo;
use daylapse_core::ports::annotator::FrameAnnotator;
use daylapse_core::ports::runner::{CommandOutput, CommandRunner};
use daylapse_core::runner::ShellRunner;
use daylapse_pipeline::assembler::VideoAssembler;
use daylapse_pipeline::publisher::Publisher;

/// 항상 비정상 종료를 보고하는 러너
struct FailingRunner;

#[async_trait]
impl CommandRunner for FailingRunner {
    async fn run(&self, _program: &str, _args: &[String]) -> Result<CommandOutput, CoreError> {
        Ok(CommandOutput {
            success: false,
            stdout: String::new(),
            stderr: "명령 실패".to_string(),
        })
    }
}

#[tokio::test]
async fn corrupt_sequence_reports_filename() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("zzz_notes.txt"), b"junk").unwrap();

    let err = sequencer::next_sequence(dir.path()).await.unwrap_err();
    assert_matches!(err, CoreError::SequenceCorrupt { ref filename } if filename == "zzz_notes.txt");
    assert!(format!("{err}").contains("시퀀스 손상"));
}

#[tokio::test]
async fn annotation_failure_is_annotation_error() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("image_00000.bmp");
    std::fs::write(&raw, b"bmp").unwrap();

    let annotator = MontageAnnotator::new(Arc::new(FailingRunner), chrono_tz::Europe::Amsterdam);
    let err = annotator
        .annotate(&raw, &dir.path().join("image_00000.jpg"))
        .await
        .unwrap_err();

    assert_matches!(err, CoreError::Annotation(_));
    assert!(format!("{err}").contains("montage"));
}

#[tokio::test]
async fn encode_failure_is_encode_error() {
    let images = TempDir::new().unwrap();
    let videos = TempDir::new().unwrap();
    let assembler = VideoAssembler::new(
        Arc::new(FailingRunner),
        images.path().to_path_buf(),
        videos.path().to_path_buf(),
    );

    let err = assembler
        .assemble(chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Encode(_));
}

#[tokio::test]
async fn upload_failure_is_publish_error() {
    let publisher = Publisher::new(Arc::new(FailingRunner));
    let video = AssembledVideo {
        path: std::path::PathBuf::from("/tmp/20240305_timelapse.mp4"),
        title: "Timelapse for Tuesday March 05, 2024".to_string(),
    };

    let err = publisher.publish(&video).await.unwrap_err();
    assert_matches!(err, CoreError::Publish(_));
}

#[test]
fn unknown_timezone_is_config_error() {
    let mut config = AppConfig::default_config();
    config.capture.timezone = "Mars/Olympus".to_string();

    let err = config.validate().unwrap_err();
    assert_matches!(err, CoreError::Config(_));
    assert!(format!("{err}").contains("타임존"));
}

#[tokio::test]
async fn missing_command_is_io_error() {
    let runner = ShellRunner::new();
    let err = runner.run("daylapse-없는-명령", &[]).await.unwrap_err();
    assert_matches!(err, CoreError::Io(_));
}
