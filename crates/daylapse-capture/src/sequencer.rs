//! 시퀀스 복원.
//!
//! 이미지 디렉토리에 남아 있는 파일에서 다음 프레임 시퀀스 번호를
//! 유도한다. 세션이 재시작되어도 번호가 이어지므로 이전 프레임을
//! 덮어쓰지 않는다.

use std::path::Path;
use tokio::fs;

use daylapse_core::error::CoreError;
use daylapse_core::models::frame;

/// 디렉토리 상태에서 다음 시퀀스 번호 계산
///
/// 비어 있으면 0. 아니면 사전순 마지막 파일명의 숫자 접미사 + 1.
/// 마지막 파일명을 파싱할 수 없으면 `SequenceCorrupt`.
/// 같은 디렉토리에 두 번 호출하면 같은 값을 돌려준다.
pub async fn next_sequence(image_dir: &Path) -> Result<u32, CoreError> {
    if !image_dir.exists() {
        return Ok(0);
    }

    let mut entries = fs::read_dir(image_dir)
        .await
        .map_err(|e| CoreError::Internal(format!("이미지 디렉토리 읽기 실패: {e}")))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| CoreError::Internal(format!("디렉토리 항목 읽기 실패: {e}")))?
    {
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    let Some(latest) = names.last() else {
        return Ok(0);
    };

    match frame::parse_sequence(latest) {
        Some(seq) => Ok(seq + 1),
        None => Err(CoreError::SequenceCorrupt {
            filename: latest.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        std::fs::write(dir.path().join(name), b"x").unwrap();
    }

    #[tokio::test]
    async fn empty_directory_starts_at_zero() {
        let dir = TempDir::new().unwrap();
        assert_eq!(next_sequence(dir.path()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_directory_starts_at_zero() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no_such");
        assert_eq!(next_sequence(&missing).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn continues_after_latest_frame() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "image_00005.jpg");
        touch(&dir, "image_00007.jpg");
        touch(&dir, "image_00006.jpg");

        assert_eq!(next_sequence(dir.path()).await.unwrap(), 8);
    }

    #[tokio::test]
    async fn mixed_raw_and_annotated_files() {
        // 주석 실패로 남은 bmp가 최신이어도 번호는 이어진다
        let dir = TempDir::new().unwrap();
        touch(&dir, "image_00002.jpg");
        touch(&dir, "image_00003.bmp");

        assert_eq!(next_sequence(dir.path()).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn malformed_latest_is_corrupt() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "image_00001.jpg");
        touch(&dir, "zzz_notes.txt");

        let err = next_sequence(dir.path()).await.unwrap_err();
        assert_matches!(err, CoreError::SequenceCorrupt { filename } if filename == "zzz_notes.txt");
    }

    #[tokio::test]
    async fn idempotent_over_unchanged_directory() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "image_00041.jpg");

        let first = next_sequence(dir.path()).await.unwrap();
        let second = next_sequence(dir.path()).await.unwrap();
        assert_eq!(first, 42);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn subdirectories_are_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("zzz_subdir")).unwrap();
        touch(&dir, "image_00009.jpg");

        assert_eq!(next_sequence(dir.path()).await.unwrap(), 10);
    }
}
