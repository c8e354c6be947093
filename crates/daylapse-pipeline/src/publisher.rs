//! 비디오 게시.
//!
//! `youtube-upload` CLI를 호출해 조립된 타임랩스를 비공개로
//! 올린다. 인증(OAuth 토큰 등)은 CLI 쪽 설정에 맡긴다.

use std::sync::Arc;

use tracing::{debug, info};

use daylapse_core::error::CoreError;
use daylapse_core::models::video::AssembledVideo;
use daylapse_core::ports::runner::CommandRunner;

/// 업로드에 쓰는 외부 프로그램
const UPLOAD_PROGRAM: &str = "youtube-upload";

/// 업로드 공개 범위
const PRIVACY_STATUS: &str = "private";

/// 비디오 게시기 — youtube-upload CLI 기반
pub struct Publisher {
    runner: Arc<dyn CommandRunner>,
}

impl Publisher {
    /// 새 게시기 생성
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// 조립된 비디오를 비공개로 업로드
    pub async fn publish(&self, video: &AssembledVideo) -> Result<(), CoreError> {
        let args = vec![
            format!("--title={}", video.title),
            format!("--privacyStatus={PRIVACY_STATUS}"),
            "--description=".to_string(),
            video.path.to_string_lossy().into_owned(),
        ];

        debug!("youtube-upload 실행: {}", video.path.display());

        let outcome = self
            .runner
            .run(UPLOAD_PROGRAM, &args)
            .await
            .map_err(|e| CoreError::Publish(format!("youtube-upload 실행 실패: {e}")))?;

        if !outcome.success {
            return Err(CoreError::Publish(format!(
                "youtube-upload 비정상 종료: {}",
                outcome.stderr.trim()
            )));
        }

        info!("비디오 업로드 완료: {}", video.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use daylapse_core::ports::runner::CommandOutput;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct CapturingRunner {
        calls: Mutex<Vec<(String, Vec<String>)>>,
        success: bool,
    }

    #[async_trait]
    impl CommandRunner for CapturingRunner {
        async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CoreError> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec()));
            Ok(CommandOutput {
                success: self.success,
                stdout: String::new(),
                stderr: if self.success {
                    String::new()
                } else {
                    "업로드 거부".to_string()
                },
            })
        }
    }

    fn sample_video() -> AssembledVideo {
        AssembledVideo {
            path: PathBuf::from("/videos/20240305_timelapse.mp4"),
            title: "Timelapse for Tuesday March 05, 2024".to_string(),
        }
    }

    #[tokio::test]
    async fn builds_expected_upload_arguments() {
        let runner = Arc::new(CapturingRunner {
            calls: Mutex::new(Vec::new()),
            success: true,
        });
        let publisher = Publisher::new(runner.clone());

        publisher.publish(&sample_video()).await.unwrap();

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (program, args) = &calls[0];
        assert_eq!(program, "youtube-upload");
        assert_eq!(
            args.as_slice(),
            &[
                "--title=Timelapse for Tuesday March 05, 2024".to_string(),
                "--privacyStatus=private".to_string(),
                "--description=".to_string(),
                "/videos/20240305_timelapse.mp4".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn failed_upload_is_publish_error() {
        let runner = Arc::new(CapturingRunner {
            calls: Mutex::new(Vec::new()),
            success: false,
        });
        let publisher = Publisher::new(runner);

        let err = publisher.publish(&sample_video()).await.unwrap_err();
        assert_matches!(err, CoreError::Publish(_));
    }
}
