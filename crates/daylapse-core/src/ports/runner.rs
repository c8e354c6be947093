//! 외부 프로세스 실행 포트.
//!
//! montage, ffmpeg, 업로드 명령 등 모든 외부 바이너리 호출이
//! 이 포트를 거친다. 테스트에서는 가짜 러너로 대체한다.
//!
//! 기본 구현: [`crate::runner::ShellRunner`] (tokio::process)

use async_trait::async_trait;

use crate::error::CoreError;

/// 외부 명령 실행 결과
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// 종료 코드 0 여부
    pub success: bool,
    /// 표준 출력 (UTF-8 손실 변환)
    pub stdout: String,
    /// 표준 에러 (UTF-8 손실 변환)
    pub stderr: String,
}

/// 명령 러너: 프로그램 + 인자 실행 후 출력 수집
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// 명령을 실행하고 종료까지 대기
    ///
    /// 프로그램을 찾지 못하면 `CoreError::Io`.
    /// 비정상 종료 코드는 에러가 아니라 `success = false`로 보고한다.
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CoreError>;
}
