//! 프레임 주석(타임스탬프 라벨) 포트.
//!
//! 구현: `daylapse-capture` crate (ImageMagick montage 호출)

use async_trait::async_trait;
use std::path::Path;

use crate::error::CoreError;

/// 프레임 주석기: 원본 이미지에 캡처 시각 라벨을 새긴다
///
/// 성공 시 `annotated` 경로에 파일이 존재해야 한다.
/// 실패는 해당 프레임에만 영향을 주며 (`CoreError::Annotation`),
/// 호출자는 원본을 유지한다.
#[async_trait]
pub trait FrameAnnotator: Send + Sync {
    /// `raw`의 캡처 시각을 라벨로 새겨 `annotated` 파일 생성
    async fn annotate(&self, raw: &Path, annotated: &Path) -> Result<(), CoreError>;
}
