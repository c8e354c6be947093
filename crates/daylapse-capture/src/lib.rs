//! # daylapse-capture
//!
//! 캡처 어댑터 크레이트.
//! nokhwa 웹캠 포트, 고정 간격 캡처 루프, 시퀀스 복원,
//! montage 타임스탬프 주석 등 프레임 생산 측을 담당한다.

pub mod annotator;
pub mod camera;
pub mod recorder;
pub mod sequencer;
