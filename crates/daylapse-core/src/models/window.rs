//! 캡처 윈도우 모델.
//!
//! 세션 시작 시각부터 다음 일일 컷오프까지의 구간을 계산한다.
//! 컷오프는 설정된 타임존의 벽시계 시각으로 해석하며,
//! DST 전환으로 존재하지 않거나 중복되는 시각도 처리한다.

use chrono::{DateTime, Days, LocalResult, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use std::time::Duration;

/// 캡처 윈도우: 시작 시각과 종료(컷오프) 시각
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureWindow {
    /// 윈도우 시작 시각 (세션 생성 시점)
    pub start: DateTime<Tz>,
    /// 윈도우 종료 시각 (다음 컷오프)
    pub end: DateTime<Tz>,
}

impl CaptureWindow {
    /// 현재 시각 이후(엄격히 이후)의 첫 컷오프까지 윈도우 계산
    ///
    /// 현재 시각이 정확히 컷오프와 같으면 다음 날 컷오프를 쓴다.
    pub fn until_next_cutoff(now: DateTime<Tz>, cutoff: NaiveTime) -> Self {
        let tz = now.timezone();
        let mut date = now.date_naive();
        let mut end = resolve_local(tz, date.and_time(cutoff));
        if end <= now {
            date = date + Days::new(1);
            end = resolve_local(tz, date.and_time(cutoff));
        }
        Self { start: now, end }
    }

    /// 윈도우 길이
    pub fn duration(&self) -> Duration {
        (self.end - self.start).to_std().unwrap_or_default()
    }
}

/// 벽시계 시각을 타임존 시각으로 해석
///
/// DST 봄 전환으로 존재하지 않는 시각은 1시간 뒤로 민다.
/// 가을 전환으로 중복되는 시각은 먼저 오는 쪽을 쓴다.
fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => resolve_local(tz, naive + chrono::Duration::hours(1)),
    }
}
