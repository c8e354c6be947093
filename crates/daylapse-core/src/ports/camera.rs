//! 카메라 캡처 포트.
//!
//! 구현: `daylapse-capture` crate (nokhwa, image)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::frame::FrameSize;

/// 연결된 카메라 정보
#[derive(Debug, Clone)]
pub struct CameraInfo {
    /// 디바이스 인덱스
    pub index: u32,
    /// 사람이 읽는 디바이스 이름
    pub name: String,
    /// 백엔드가 제공하는 설명
    pub description: String,
}

/// 카메라 포트: 디바이스 열거와 열기
#[async_trait]
pub trait CameraPort: Send + Sync {
    /// 사용 가능한 카메라 목록 조회
    fn list_devices(&self) -> Result<Vec<CameraInfo>, CoreError>;

    /// 첫 번째 카메라를 지정 해상도로 열고 스트림 시작
    ///
    /// 반환된 디바이스는 캡처 워커가 단독 소유한다.
    async fn open(&self, size: FrameSize) -> Result<Box<dyn CaptureDevice>, CoreError>;
}

/// 열린 캡처 디바이스: 프레임 획득과 해제
///
/// `grab` 실패는 세션에 치명적이다 (`CoreError::Device`).
/// 어떤 종료 경로에서도 `release`가 호출되어야 한다.
#[async_trait]
pub trait CaptureDevice: Send {
    /// 프레임 1장 획득, BMP 인코딩된 바이트 반환
    async fn grab(&mut self) -> Result<Vec<u8>, CoreError>;

    /// 스트림 종료 및 디바이스 해제
    async fn release(&mut self) -> Result<(), CoreError>;
}
