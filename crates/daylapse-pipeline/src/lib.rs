//! # daylapse-pipeline
//!
//! 후처리 파이프라인 크레이트.
//! 세션이 끝난 뒤의 ffmpeg 비디오 조립, 선택적 업로드,
//! 이미지 디렉토리 하우스키핑을 담당한다.

pub mod assembler;
pub mod housekeeper;
pub mod publisher;
