//! 프레임 파일 이름 규칙 모델.
//!
//! 시퀀스 번호 기반 파일명(`image_NNNNN`)과 원본/주석 파일 경로,
//! 시퀀스 번호 파싱을 정의한다. 파일명 규칙은 인코더 입력 패턴과
//! 일치해야 하므로 이 모듈 밖에서 만들지 않는다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 프레임 파일명 접두사
pub const FRAME_PREFIX: &str = "image_";

/// 원본(주석 전) 파일 확장자
pub const RAW_EXT: &str = "bmp";

/// 주석 완료 파일 확장자
pub const ANNOTATED_EXT: &str = "jpg";

/// 인코더 입력 패턴 (5자리 제로 패딩 시퀀스)
pub const ENCODER_INPUT_PATTERN: &str = "image_%05d.jpg";

/// 캡처 해상도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    /// 가로 (픽셀)
    pub width: u32,
    /// 세로 (픽셀)
    pub height: u32,
}

/// 세션 내 단일 프레임의 파일 경로 쌍
#[derive(Debug, Clone)]
pub struct FramePaths {
    /// 시퀀스 번호
    pub sequence: u32,
    /// 원본 캡처 파일 (BMP)
    pub raw: PathBuf,
    /// 주석 완료 파일 (JPEG)
    pub annotated: PathBuf,
}

/// 시퀀스 번호의 파일명 스템 (`image_00042`)
pub fn frame_stem(sequence: u32) -> String {
    format!("{FRAME_PREFIX}{sequence:05}")
}

/// 시퀀스 번호의 원본/주석 경로 쌍 생성
pub fn frame_paths(image_dir: &Path, sequence: u32) -> FramePaths {
    let stem = frame_stem(sequence);
    FramePaths {
        sequence,
        raw: image_dir.join(format!("{stem}.{RAW_EXT}")),
        annotated: image_dir.join(format!("{stem}.{ANNOTATED_EXT}")),
    }
}

/// 인코더에 넘길 입력 패턴 경로 (`<dir>/image_%05d.jpg`)
pub fn encoder_input(image_dir: &Path) -> PathBuf {
    image_dir.join(ENCODER_INPUT_PATTERN)
}

/// 파일명에서 시퀀스 번호 파싱
///
/// 마지막 `_`와 확장자 사이의 숫자를 읽는다.
/// 규칙에 맞지 않는 파일명이면 `None`.
pub fn parse_sequence(filename: &str) -> Option<u32> {
    let stem = filename
        .rsplit_once('.')
        .map(|(stem, _ext)| stem)
        .unwrap_or(filename);
    let (_, digits) = stem.rsplit_once('_')?;
    digits.parse().ok()
}
