//! 캡처 루프.
//!
//! 전용 tokio 태스크에서 고정 간격으로 프레임을 획득하고
//! 주석 단계를 거쳐 이미지 디렉토리에 쌓는다.
//! `Recorder::spawn`이 소유권을 워커로 넘기고, 반환된
//! [`RecorderHandle::stop`]이 협조적 종료와 join을 담당한다.
//!
//! 정지 플래그는 반복 초입에서만 확인한다. 진행 중인 캡처는
//! 항상 완료되어 산출물이 커밋된 뒤에 디바이스가 해제된다.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use daylapse_core::error::CoreError;
use daylapse_core::models::frame::{self, FramePaths};
use daylapse_core::ports::annotator::FrameAnnotator;
use daylapse_core::ports::camera::CaptureDevice;

/// 캡처 루프 설정
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// 프레임 저장 디렉토리
    pub image_dir: PathBuf,
    /// 캡처 간격 (사이클 소요 시간과 무관한 고정 수면)
    pub interval: Duration,
    /// 시작 시퀀스 번호 (시퀀스 복원 결과)
    pub start_sequence: u32,
}

/// 세션 종료 시 워커가 돌려주는 집계
#[derive(Debug, Clone, Default)]
pub struct RecorderReport {
    /// 커밋된 프레임 수 (워밍업 샷은 세지 않는다)
    pub frames_captured: u64,
    /// 주석 실패로 원본이 유지된 프레임 수
    pub frames_retained_raw: u64,
    /// 마지막으로 커밋된 시퀀스 번호
    pub last_sequence: Option<u32>,
}

/// 캡처 루프 워커
///
/// `spawn`이 self를 소비하므로 같은 레코더를 두 번 시작할 수 없다.
pub struct Recorder {
    config: RecorderConfig,
    device: Box<dyn CaptureDevice>,
    annotator: Arc<dyn FrameAnnotator>,
}

/// 실행 중인 캡처 워커의 핸들
///
/// `stop`이 self를 소비하므로 이중 join이 불가능하다.
pub struct RecorderHandle {
    stop_tx: watch::Sender<bool>,
    worker: JoinHandle<Result<RecorderReport, CoreError>>,
}

impl Recorder {
    /// 새 캡처 루프 생성 (디바이스는 워커가 단독 소유)
    pub fn new(
        config: RecorderConfig,
        device: Box<dyn CaptureDevice>,
        annotator: Arc<dyn FrameAnnotator>,
    ) -> Self {
        Self {
            config,
            device,
            annotator,
        }
    }

    /// 전용 태스크에서 캡처 루프 시작
    pub fn spawn(self) -> RecorderHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let worker = tokio::spawn(self.run(stop_rx));
        RecorderHandle { stop_tx, worker }
    }

    async fn run(mut self, mut stop_rx: watch::Receiver<bool>) -> Result<RecorderReport, CoreError> {
        let mut report = RecorderReport::default();
        let outcome = self.capture_loop(&mut stop_rx, &mut report).await;

        // 종료 경로와 무관하게 디바이스 해제
        if let Err(e) = self.device.release().await {
            warn!("카메라 해제 실패: {e}");
        }

        match outcome {
            Ok(()) | Err(CoreError::ShutdownRequested) => Ok(report),
            Err(e) => Err(e),
        }
    }

    async fn capture_loop(
        &mut self,
        stop_rx: &mut watch::Receiver<bool>,
        report: &mut RecorderReport,
    ) -> Result<(), CoreError> {
        info!(
            "캡처 루프 시작: 시퀀스 {}부터, 간격 {:?}",
            self.config.start_sequence, self.config.interval
        );

        let mut sequence = self.config.start_sequence;
        let mut first_cycle = true;

        loop {
            // 정지 플래그는 반복 초입에서만 확인한다
            if should_stop(stop_rx) {
                info!("캡처 루프 종료");
                return Err(CoreError::ShutdownRequested);
            }

            let paths = frame::frame_paths(&self.config.image_dir, sequence);

            // 첫 사이클은 워밍업 샷을 한 장 더 떠서 같은 번호 위에 덮어쓴다.
            // 일부 디바이스의 첫 버퍼는 비어 있거나 오래된 프레임이다.
            if first_cycle {
                self.capture_frame(&paths).await?;
                first_cycle = false;
            }

            let annotated = self.capture_frame(&paths).await?;
            report.frames_captured += 1;
            if !annotated {
                report.frames_retained_raw += 1;
            }
            report.last_sequence = Some(sequence);
            sequence += 1;

            // 고정 간격 수면. 정지 신호는 수면만 끊는다.
            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                _ = stop_rx.changed() => {}
            }
        }
    }

    /// 프레임 1장 캡처 + 주석 + 원본 정리
    ///
    /// 반환값: 주석 성공 여부. 주석 실패는 원본을 유지하고 계속,
    /// 획득/저장 실패는 세션 종료로 전파된다.
    async fn capture_frame(&mut self, paths: &FramePaths) -> Result<bool, CoreError> {
        let bytes = self.device.grab().await?;
        fs::write(&paths.raw, &bytes).await?;
        debug!("프레임 캡처: {} ({} bytes)", paths.raw.display(), bytes.len());

        match self.annotator.annotate(&paths.raw, &paths.annotated).await {
            Ok(()) => {
                // 주석본이 확인된 경우에만 원본 삭제
                if paths.annotated.exists() && paths.raw.exists() {
                    if let Err(e) = fs::remove_file(&paths.raw).await {
                        warn!("원본 삭제 실패: {e}");
                    }
                }
                Ok(true)
            }
            Err(e) => {
                warn!("프레임 주석 실패, 원본 유지: {e}");
                Ok(false)
            }
        }
    }
}

impl RecorderHandle {
    /// 정지 요청 후 워커 종료까지 대기
    ///
    /// 진행 중인 캡처가 완료되고 디바이스가 해제된 뒤에 반환된다.
    /// 워커가 디바이스 에러로 먼저 죽었다면 그 에러를 돌려준다.
    pub async fn stop(self) -> Result<RecorderReport, CoreError> {
        let _ = self.stop_tx.send(true);
        match self.worker.await {
            Ok(outcome) => outcome,
            Err(e) => Err(CoreError::Internal(format!("캡처 워커 join 실패: {e}"))),
        }
    }

    /// 워커가 이미 스스로 종료했는지 (디바이스 에러 등)
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }
}

/// 정지 신호 수신 또는 핸들 소멸 여부
fn should_stop(stop_rx: &watch::Receiver<bool>) -> bool {
    *stop_rx.borrow() || stop_rx.has_changed().is_err()
}
