//! 세션 스케줄러.
//!
//! 하루 단위 캡처 창을 계산하고, 창마다 캡처 워커 기동 / 창 종료
//! 대기 / 워커 join / 후처리(조립, 게시, 정리)를 반복한다.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tokio::fs;
use tokio::sync::watch;
use tracing::{error, info, warn};

use daylapse_capture::recorder::{Recorder, RecorderConfig};
use daylapse_capture::sequencer;
use daylapse_core::config::AppConfig;
use daylapse_core::error::CoreError;
use daylapse_core::models::window::CaptureWindow;
use daylapse_core::ports::annotator::FrameAnnotator;
use daylapse_core::ports::camera::{CameraPort, CaptureDevice};
use daylapse_pipeline::assembler::VideoAssembler;
use daylapse_pipeline::housekeeper;
use daylapse_pipeline::publisher::Publisher;

/// 창 하나를 돌린 결과
#[derive(Debug, Clone, Copy)]
struct WindowOutcome {
    /// 캡처 워커가 실제로 기동되었는지
    session_started: bool,
    /// 종료 신호로 끝났는지
    interrupted: bool,
}

/// 세션 스케줄러
///
/// 캡처 워커는 한 번에 하나만 존재한다. 이전 워커의 join이
/// 끝나기 전에는 다음 세션을 시작하지 않는다.
pub struct SessionScheduler {
    config: AppConfig,
    timezone: Tz,
    camera: Arc<dyn CameraPort>,
    annotator: Arc<dyn FrameAnnotator>,
    assembler: VideoAssembler,
    publisher: Publisher,
}

impl SessionScheduler {
    /// 새 스케줄러 생성
    pub fn new(
        config: AppConfig,
        timezone: Tz,
        camera: Arc<dyn CameraPort>,
        annotator: Arc<dyn FrameAnnotator>,
        assembler: VideoAssembler,
        publisher: Publisher,
    ) -> Self {
        Self {
            config,
            timezone,
            camera,
            annotator,
            assembler,
            publisher,
        }
    }

    /// 세션 루프 시작
    ///
    /// 종료 신호가 오면 진행 중인 세션을 멈추고 그때까지 모은
    /// 프레임까지 후처리한 뒤 반환한다. 첫 세션 준비가 실패하면
    /// 치명 에러로 즉시 반환하고, 그 뒤의 준비 실패는 해당 창을
    /// 건너뛰고 다음 날 다시 시도한다.
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), CoreError> {
        info!(
            "세션 스케줄러 시작: 간격={}초, 마감={:02}:{:02}, 타임존={}",
            self.config.capture.interval_secs,
            self.config.schedule.cutoff_hour,
            self.config.schedule.cutoff_minute,
            self.timezone,
        );

        let mut first_session = true;

        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            let outcome = self.run_window(first_session, &mut shutdown_rx).await?;
            if outcome.session_started {
                first_session = false;
            }
            if outcome.interrupted {
                break;
            }
        }

        info!("세션 스케줄러 종료");
        Ok(())
    }

    /// 창 하나를 처리한다: 준비, 캡처, 창 종료 대기, 후처리
    ///
    /// 세션 준비 실패는 첫 세션이면 치명 에러로 전파한다. 첫 세션이
    /// 기동된 뒤에는 어떤 준비 실패도 데몬을 멈추지 않는다: 경고 후
    /// 창이 끝날 때까지 기다렸다가 다음 창에서 다시 시도한다.
    async fn run_window(
        &self,
        first_session: bool,
        shutdown_rx: &mut watch::Receiver<bool>,
    ) -> Result<WindowOutcome, CoreError> {
        // ============================================================
        // 1. 세션 창 계산
        // ============================================================
        let now = Utc::now().with_timezone(&self.timezone);
        let window = CaptureWindow::until_next_cutoff(now, self.config.schedule.cutoff_time());
        info!("세션 창: {} ~ {}", window.start, window.end);

        // ============================================================
        // 2. 세션 준비 (디렉토리, 시퀀스 복원, 카메라)
        // ============================================================
        let (start_sequence, device) = match self.open_session().await {
            Ok(session) => session,
            Err(e) if first_session => {
                error!("첫 세션 준비 실패, 기동 중단: {e}");
                return Err(e);
            }
            Err(e) => {
                // 다음 창에서 다시 시도한다
                warn!("세션 준비 실패, 이 세션 건너뜀: {e}");
                let interrupted = wait_for_window_end(window.duration(), shutdown_rx).await;
                return Ok(WindowOutcome {
                    session_started: false,
                    interrupted,
                });
            }
        };

        // ============================================================
        // 3. 캡처 워커 기동
        // ============================================================
        let recorder = Recorder::new(
            RecorderConfig {
                image_dir: self.config.capture.image_dir.clone(),
                interval: Duration::from_secs(self.config.capture.interval_secs),
                start_sequence,
            },
            device,
            self.annotator.clone(),
        );
        let handle = recorder.spawn();

        // ============================================================
        // 4. 창 종료 또는 종료 신호 대기, 워커 join
        // ============================================================
        let interrupted = wait_for_window_end(window.duration(), shutdown_rx).await;

        match handle.stop().await {
            Ok(report) => info!(
                "세션 종료: {}프레임 캡처, 원본 유지 {}건",
                report.frames_captured, report.frames_retained_raw
            ),
            Err(e) => warn!("캡처 루프 비정상 종료: {e}"),
        }

        // ============================================================
        // 5. 후처리 (중단된 세션도 모은 프레임은 비디오로 만든다)
        // ============================================================
        self.post_process(window.start.date_naive()).await;

        Ok(WindowOutcome {
            session_started: true,
            interrupted,
        })
    }

    /// 세션 준비: 이미지 디렉토리 보장, 시퀀스 복원, 카메라 열기
    ///
    /// 시퀀스 손상만 여기서 흡수한다 (경고 후 0부터). 나머지 실패는
    /// 호출자가 첫 세션 여부에 따라 치명/건너뜀을 결정한다.
    async fn open_session(&self) -> Result<(u32, Box<dyn CaptureDevice>), CoreError> {
        fs::create_dir_all(&self.config.capture.image_dir).await?;

        let start_sequence = match sequencer::next_sequence(&self.config.capture.image_dir).await {
            Ok(seq) => seq,
            Err(CoreError::SequenceCorrupt { filename }) => {
                warn!("시퀀스 손상 ({filename}), 0부터 다시 시작");
                0
            }
            Err(e) => return Err(e),
        };

        let device = self.camera.open(self.config.capture.frame_size()).await?;
        Ok((start_sequence, device))
    }

    /// 창 하나의 후처리: 조립 → (설정 시) 게시 → 정리
    ///
    /// 어떤 실패도 경고로만 남긴다. 다음 날 세션은 반드시 시작된다.
    async fn post_process(&self, date: NaiveDate) {
        match self.assembler.assemble(date).await {
            Ok(video) => {
                if self.config.publish.enabled {
                    if let Err(e) = self.publisher.publish(&video).await {
                        warn!("비디오 업로드 실패: {e}");
                    }
                }
            }
            Err(e) => warn!("비디오 조립 실패: {e}"),
        }

        // 조립 시도가 끝난 뒤에만 프레임을 비운다. 다음 세션은 0부터 시작한다.
        if let Err(e) = housekeeper::sweep(&self.config.capture.image_dir).await {
            warn!("이미지 디렉토리 정리 실패: {e}");
        }
    }
}

/// 창 종료 시각까지 대기
///
/// 반환값: 종료 신호로 중단되었는지 여부.
async fn wait_for_window_end(window: Duration, shutdown_rx: &mut watch::Receiver<bool>) -> bool {
    if *shutdown_rx.borrow() {
        return true;
    }
    tokio::select! {
        _ = tokio::time::sleep(window) => false,
        _ = shutdown_rx.changed() => true,
    }
}
