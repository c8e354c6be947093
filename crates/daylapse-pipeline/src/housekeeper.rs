//! 하우스키핑.
//!
//! 비디오 조립이 끝난 뒤 이미지 디렉토리의 프레임 파일을 비워
//! 다음 세션이 시퀀스 0부터 시작하게 한다. 조립보다 먼저 실행되면
//! 안 된다. 입력 프레임이 사라진다.

use std::path::Path;

use tokio::fs;
use tracing::{info, warn};

use daylapse_core::error::CoreError;

/// 이미지 디렉토리의 일반 파일 전부 삭제
///
/// 하위 디렉토리는 건드리지 않는다. 개별 파일 삭제 실패는 경고만
/// 남기고 계속한다. 반환값은 삭제한 파일 수.
pub async fn sweep(image_dir: &Path) -> Result<usize, CoreError> {
    // 디렉토리가 없으면 지울 것도 없다
    if !image_dir.exists() {
        return Ok(0);
    }

    let mut entries = fs::read_dir(image_dir)
        .await
        .map_err(|e| CoreError::Internal(format!("이미지 디렉토리 조회 실패: {e}")))?;

    let mut removed = 0usize;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| CoreError::Internal(format!("디렉토리 항목 조회 실패: {e}")))?
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match fs::remove_file(&path).await {
            Ok(()) => removed += 1,
            Err(e) => warn!("프레임 삭제 실패: {} ({e})", path.display()),
        }
    }

    info!("이미지 디렉토리 정리: {removed}개 파일 삭제");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn removes_files_and_keeps_subdirectories() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("image_00000.jpg"), b"jpg").unwrap();
        std::fs::write(dir.path().join("image_00001.bmp"), b"bmp").unwrap();
        std::fs::create_dir(dir.path().join("archive")).unwrap();
        std::fs::write(dir.path().join("archive").join("keep.jpg"), b"jpg").unwrap();

        let removed = sweep(dir.path()).await.unwrap();

        assert_eq!(removed, 2);
        assert!(!dir.path().join("image_00000.jpg").exists());
        assert!(!dir.path().join("image_00001.bmp").exists());
        assert!(dir.path().join("archive").join("keep.jpg").exists());
    }

    #[tokio::test]
    async fn missing_dir_removes_nothing() {
        let dir = TempDir::new().unwrap();
        let removed = sweep(&dir.path().join("없는_디렉토리")).await.unwrap();
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn empty_dir_removes_nothing() {
        let dir = TempDir::new().unwrap();
        let removed = sweep(dir.path()).await.unwrap();
        assert_eq!(removed, 0);
    }
}
