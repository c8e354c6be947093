//! # daylapse-app
//!
//! 데몬 오케스트레이션 크레이트.
//! 세션 스케줄러와 라이프사이클 관리를 담고, `daylapse` 바이너리가
//! 여기에 어댑터를 꽂아 실행한다.

pub mod lifecycle;
pub mod scheduler;
