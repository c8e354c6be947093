//! 프레임 주석.
//!
//! ImageMagick `montage`를 호출해 원본 프레임 위에 캡처 시각
//! 라벨을 새긴 JPEG 주석본을 만든다. 캡처 시각은 원본 파일의
//! 생성 시각에서 읽어 설정 타임존으로 표기한다.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::fs;
use tracing::debug;

use daylapse_core::error::CoreError;
use daylapse_core::ports::annotator::FrameAnnotator;
use daylapse_core::ports::runner::CommandRunner;

/// 주석에 쓰는 외부 프로그램
const ANNOTATE_PROGRAM: &str = "montage";

/// 라벨 시각 포맷 (예: `2024-03-05 15:30 +0100`)
const LABEL_FORMAT: &str = "%Y-%m-%d %H:%M %z";

/// 라벨 배경색
const LABEL_BACKGROUND: &str = "Khaki";

/// 라벨 폰트 크기
const LABEL_POINT_SIZE: u32 = 18;

/// 라벨 배치 (여백 없이 원본 크기 유지)
const LABEL_GEOMETRY: &str = "+0+0";

/// 캡처 시각을 라벨 문자열로 포맷
pub fn timestamp_label(instant: DateTime<Utc>, timezone: &Tz) -> String {
    instant.with_timezone(timezone).format(LABEL_FORMAT).to_string()
}

/// 프레임 주석기 — ImageMagick montage 기반
pub struct MontageAnnotator {
    runner: Arc<dyn CommandRunner>,
    timezone: Tz,
}

impl MontageAnnotator {
    /// 새 주석기 생성
    pub fn new(runner: Arc<dyn CommandRunner>, timezone: Tz) -> Self {
        Self { runner, timezone }
    }
}

#[async_trait]
impl FrameAnnotator for MontageAnnotator {
    async fn annotate(&self, raw: &Path, annotated: &Path) -> Result<(), CoreError> {
        let meta = fs::metadata(raw)
            .await
            .map_err(|e| CoreError::Annotation(format!("원본 메타데이터 조회 실패: {e}")))?;

        // 생성 시각이 없는 파일시스템은 수정 시각으로 대체
        let instant = meta
            .created()
            .or_else(|_| meta.modified())
            .map_err(|e| CoreError::Annotation(format!("원본 캡처 시각 조회 실패: {e}")))?;

        let label = timestamp_label(instant.into(), &self.timezone);

        let args = vec![
            "-label".to_string(),
            label,
            raw.to_string_lossy().into_owned(),
            "-geometry".to_string(),
            LABEL_GEOMETRY.to_string(),
            "-background".to_string(),
            LABEL_BACKGROUND.to_string(),
            "-pointsize".to_string(),
            LABEL_POINT_SIZE.to_string(),
            annotated.to_string_lossy().into_owned(),
        ];

        let output = self
            .runner
            .run(ANNOTATE_PROGRAM, &args)
            .await
            .map_err(|e| CoreError::Annotation(format!("montage 실행 실패: {e}")))?;

        if !output.success {
            return Err(CoreError::Annotation(format!(
                "montage 비정상 종료: {}",
                output.stderr.trim()
            )));
        }

        if !annotated.exists() {
            return Err(CoreError::Annotation(format!(
                "주석본이 생성되지 않음: {}",
                annotated.display()
            )));
        }

        debug!("프레임 주석 완료: {}", annotated.display());
        Ok(())
    }
}
