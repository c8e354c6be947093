//! 웹캠 캡처.
//!
//! nokhwa 기반 카메라 어댑터. 설정 해상도에 가장 가까운 MJPEG
//! 포맷을 협상하고 프레임을 BMP 바이트로 돌려준다.

use std::io::Cursor;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    Resolution,
};
use nokhwa::{query, Camera};
use tracing::{debug, info};

use daylapse_core::error::CoreError;
use daylapse_core::models::frame::FrameSize;
use daylapse_core::ports::camera::{CameraInfo, CameraPort, CaptureDevice};

/// 포맷 협상에 요청하는 프레임레이트
const REQUESTED_FPS: u32 = 30;

/// 웹캠 포트 — nokhwa 기반
pub struct NokhwaCameraPort {
    /// 사용할 디바이스 인덱스
    index: u32,
}

impl NokhwaCameraPort {
    /// 첫 번째 카메라를 쓰는 포트 생성
    pub fn new() -> Self {
        Self { index: 0 }
    }
}

impl Default for NokhwaCameraPort {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CameraPort for NokhwaCameraPort {
    fn list_devices(&self) -> Result<Vec<CameraInfo>, CoreError> {
        let devices = query(ApiBackend::Auto)
            .map_err(|e| CoreError::Device(format!("카메라 목록 조회 실패: {e}")))?;

        Ok(devices
            .iter()
            .enumerate()
            .map(|(i, info)| CameraInfo {
                index: i as u32,
                name: info.human_name().to_string(),
                description: info.description().to_string(),
            })
            .collect())
    }

    async fn open(&self, size: FrameSize) -> Result<Box<dyn CaptureDevice>, CoreError> {
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                Resolution::new(size.width, size.height),
                FrameFormat::MJPEG,
                REQUESTED_FPS,
            ),
        ));

        let mut camera = Camera::new(CameraIndex::Index(self.index), requested)
            .map_err(|e| CoreError::Device(format!("카메라 열기 실패: {e}")))?;

        camera
            .open_stream()
            .map_err(|e| CoreError::Device(format!("캡처 스트림 시작 실패: {e}")))?;

        let actual = camera.camera_format();
        info!(
            "카메라 {} 열림: {} @ {}fps",
            self.index,
            actual.resolution(),
            actual.frame_rate()
        );

        Ok(Box::new(NokhwaDevice { camera }))
    }
}

/// 열린 카메라 스트림
struct NokhwaDevice {
    camera: Camera,
}

#[async_trait]
impl CaptureDevice for NokhwaDevice {
    async fn grab(&mut self) -> Result<Vec<u8>, CoreError> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| CoreError::Device(format!("프레임 획득 실패: {e}")))?;

        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CoreError::Device(format!("프레임 디코딩 실패: {e}")))?;

        debug!("프레임 획득: {}x{}", decoded.width(), decoded.height());

        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(decoded)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Bmp)
            .map_err(|e| CoreError::Device(format!("BMP 인코딩 실패: {e}")))?;

        Ok(bytes)
    }

    async fn release(&mut self) -> Result<(), CoreError> {
        self.camera
            .stop_stream()
            .map_err(|e| CoreError::Device(format!("캡처 스트림 정지 실패: {e}")))
    }
}
