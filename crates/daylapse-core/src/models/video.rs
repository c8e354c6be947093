//! 비디오 출력 이름 규칙 모델.
//!
//! 윈도우 시작 날짜에서 출력 파일명과 제목을 결정론적으로 유도한다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 출력 파일명 접미사
const VIDEO_FILE_SUFFIX: &str = "_timelapse.mp4";

/// 인코딩 완료된 비디오
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembledVideo {
    /// 출력 파일 경로
    pub path: PathBuf,
    /// 업로드용 제목
    pub title: String,
}

/// 출력 파일 경로 (`<dir>/20240305_timelapse.mp4`)
pub fn output_path(video_dir: &Path, date: NaiveDate) -> PathBuf {
    video_dir.join(format!("{}{}", date.format("%Y%m%d"), VIDEO_FILE_SUFFIX))
}

/// 업로드용 제목 (`Timelapse for Tuesday March 05, 2024`)
pub fn title_for(date: NaiveDate) -> String {
    format!("Timelapse for {}", date.format("%A %B %d, %Y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_uses_compact_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let path = output_path(Path::new("./videos"), date);
        assert_eq!(path, PathBuf::from("./videos/20240305_timelapse.mp4"));
    }

    #[test]
    fn title_spells_out_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(title_for(date), "Timelapse for Tuesday March 05, 2024");
    }

    #[test]
    fn single_digit_day_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(title_for(date), "Timelapse for Monday January 01, 2024");
        assert_eq!(
            output_path(Path::new("/v"), date),
            PathBuf::from("/v/20240101_timelapse.mp4")
        );
    }
}
