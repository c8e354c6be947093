//! daylapse 데몬 바이너리 진입점.
//!
//! DI 컨테이너 역할: 설정을 읽고 어댑터를 조립해
//! 세션 스케줄러에 꽂은 뒤 OS 시그널을 기다린다.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use daylapse_capture::annotator::MontageAnnotator;
use daylapse_capture::camera::NokhwaCameraPort;
use daylapse_core::config_manager::ConfigManager;
use daylapse_core::ports::camera::CameraPort;
use daylapse_core::runner::ShellRunner;
use daylapse_pipeline::assembler::VideoAssembler;
use daylapse_pipeline::publisher::Publisher;

use daylapse_app::lifecycle::LifecycleManager;
use daylapse_app::scheduler::SessionScheduler;

/// daylapse 데몬
///
/// 웹캠으로 하루치 프레임을 모아 타임랩스 비디오를 만든다
#[derive(Parser, Debug)]
#[command(name = "daylapse")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 이미지 디렉토리 오버라이드
    #[arg(long)]
    image_dir: Option<PathBuf>,

    /// 비디오 디렉토리 오버라이드
    #[arg(long)]
    video_dir: Option<PathBuf>,

    /// 캡처 간격 오버라이드 (초)
    #[arg(long)]
    interval: Option<u64>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 조립된 비디오 업로드 활성화
    #[arg(long)]
    publish: bool,

    /// 사용 가능한 카메라 나열 후 종료
    #[arg(long)]
    list_cameras: bool,
}

/// 배너 출력
fn print_banner() {
    println!();
    println!("╔═════════════════════════════════════════════════════════════════════╗");
    println!("║                                                                     ║");
    println!("║  ██████╗  █████╗ ██╗   ██╗██╗      █████╗ ██████╗ ███████╗███████╗  ║");
    println!("║  ██╔══██╗██╔══██╗╚██╗ ██╔╝██║     ██╔══██╗██╔══██╗██╔════╝██╔════╝  ║");
    println!("║  ██║  ██║███████║ ╚████╔╝ ██║     ███████║██████╔╝███████╗█████╗    ║");
    println!("║  ██║  ██║██╔══██║  ╚██╔╝  ██║     ██╔══██║██╔═══╝ ╚════██║██╔══╝    ║");
    println!("║  ██████╔╝██║  ██║   ██║   ███████╗██║  ██║██║     ███████║███████╗  ║");
    println!("║  ╚═════╝ ╚═╝  ╚═╝   ╚═╝   ╚══════╝╚═╝  ╚═╝╚═╝     ╚══════╝╚══════╝  ║");
    println!("║                                                                     ║");
    println!("║           하루 한 편, 무인 웹캠 타임랩스 데몬                          ║");
    println!("║                                                                     ║");
    println!("╚═════════════════════════════════════════════════════════════════════╝");
    println!();
}

/// 카메라 목록 출력
fn print_camera_list() -> Result<()> {
    let camera = NokhwaCameraPort::new();
    let devices = camera
        .list_devices()
        .map_err(|e| anyhow!("카메라 목록 조회 실패: {e}"))?;

    if devices.is_empty() {
        println!("사용 가능한 카메라가 없습니다.");
        return Ok(());
    }

    println!("사용 가능한 카메라:");
    for device in devices {
        println!("  [{}] {} ({})", device.index, device.name, device.description);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // tracing 초기화
    let log_filter = format!(
        "daylapse={},daylapse_app={},daylapse_core={},daylapse_capture={},daylapse_pipeline={}",
        args.log_level, args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    // 카메라 나열 (즉시 종료)
    if args.list_cameras {
        return print_camera_list();
    }

    print_banner();

    info!("daylapse 데몬 시작");

    // 설정 로드 (파일이 없으면 기본 설정을 만들어 저장)
    let config_manager = match args.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    }
    .map_err(|e| anyhow!("설정 로드 실패: {e}"))?;
    info!("설정 파일: {:?}", config_manager.config_path());

    let mut config = config_manager.get();

    // CLI 인자로 설정 오버라이드
    if let Some(ref dir) = args.image_dir {
        config.capture.image_dir = dir.clone();
    }
    if let Some(ref dir) = args.video_dir {
        config.video.video_dir = dir.clone();
    }
    if let Some(interval) = args.interval {
        config.capture.interval_secs = interval;
    }
    if args.publish {
        config.publish.enabled = true;
    }

    config
        .validate()
        .map_err(|e| anyhow!("설정 검증 실패: {e}"))?;
    let timezone = config
        .capture
        .parsed_timezone()
        .map_err(|e| anyhow!("타임존 해석 실패: {e}"))?;

    info!("이미지 디렉토리: {}", config.capture.image_dir.display());
    info!("비디오 디렉토리: {}", config.video.video_dir.display());
    if config.publish.enabled {
        info!("업로드 활성화: 조립된 비디오를 비공개로 게시");
    }

    // ── 어댑터 생성 (DI 와이어링) ──

    // 1. 외부 명령 러너 (montage / ffmpeg / youtube-upload 공용)
    let runner = Arc::new(ShellRunner::new());

    // 2. 카메라 포트
    let camera: Arc<dyn CameraPort> = Arc::new(NokhwaCameraPort::new());

    // 3. 프레임 주석기
    let annotator = Arc::new(MontageAnnotator::new(runner.clone(), timezone));

    // 4. 비디오 조립기
    let assembler = VideoAssembler::new(
        runner.clone(),
        config.capture.image_dir.clone(),
        config.video.video_dir.clone(),
    );

    // 5. 게시기
    let publisher = Publisher::new(runner.clone());

    // 6. 라이프사이클
    let lifecycle = Arc::new(LifecycleManager::new());

    // ── 태스크 시작 ──

    let sched = SessionScheduler::new(config, timezone, camera, annotator, assembler, publisher);
    let shutdown_rx = lifecycle.subscribe();
    let sched_task = tokio::spawn(async move { sched.run(shutdown_rx).await });

    // OS 시그널 대기는 별도 태스크로 돌린다.
    // 스케줄러가 치명 에러로 끝나면 시그널 없이도 프로세스가 내려가야 한다.
    let signal_lifecycle = lifecycle.clone();
    let signal_task = tokio::spawn(async move {
        signal_lifecycle.wait_for_signal().await;
    });

    let outcome = sched_task.await;
    signal_task.abort();

    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            error!("스케줄러 치명 에러: {e}");
            return Err(anyhow!("스케줄러 치명 에러: {e}"));
        }
        Err(e) => return Err(anyhow!("스케줄러 태스크 join 실패: {e}")),
    }

    info!("daylapse 데몬 종료");
    Ok(())
}
