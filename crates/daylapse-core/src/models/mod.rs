//! daylapse 도메인 모델.
//!
//! 프레임 이름 규칙, 캡처 윈도우, 비디오 출력 규칙 등
//! 파이프라인 전체가 공유하는 순수 데이터 구조를 정의한다.

pub mod frame;
pub mod video;
pub mod window;
