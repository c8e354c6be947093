//! daylapse 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 이 타입으로 에러를 반환한다.
//! 에러 종류가 곧 복구 정책을 결정한다:
//! `Device`는 세션 종료, `Annotation`은 해당 프레임만 포기,
//! `Encode`/`Publish`는 보고 후 다음 윈도우 계속.

use thiserror::Error;

/// 코어 레이어 에러.
/// 캡처, 주석, 인코딩, 업로드 등 파이프라인 전 단계의 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 캡처 디바이스 에러 (현재 세션에 치명적, 다음 윈도우에서 재시도)
    #[error("카메라 디바이스 에러: {0}")]
    Device(String),

    /// 프레임 주석(타임스탬프 라벨) 실패 (해당 프레임의 원본만 유지)
    #[error("프레임 주석 실패: {0}")]
    Annotation(String),

    /// 이미지 디렉토리의 최신 파일명에서 시퀀스 번호를 파싱할 수 없음
    #[error("시퀀스 손상: 파싱 불가 파일명 {filename}")]
    SequenceCorrupt {
        /// 파싱에 실패한 파일명
        filename: String,
    },

    /// 비디오 인코딩 실패 (보고 후 계속)
    #[error("비디오 인코딩 실패: {0}")]
    Encode(String),

    /// 비디오 업로드 실패 (보고 후 계속)
    #[error("업로드 실패: {0}")]
    Publish(String),

    /// 협조적 종료 요청 (실패가 아님, 디바이스 해제 후 전파)
    #[error("종료 요청됨")]
    ShutdownRequested,

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}
