//! 기본 명령 러너.
//!
//! `tokio::process::Command`로 외부 명령을 실행하고
//! 종료 상태와 출력을 수집한다.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::CoreError;
use crate::ports::runner::{CommandOutput, CommandRunner};

/// 외부 명령 러너 (tokio::process 기반)
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl ShellRunner {
    /// 새 러너 생성
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CoreError> {
        debug!("외부 명령 실행: {} {}", program, args.join(" "));

        let output = Command::new(program).args(args).output().await?;

        if !output.status.success() {
            debug!("명령 비정상 종료: {} ({})", program, output.status);
        }

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
