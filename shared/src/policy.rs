//! 取消策略模块
//!
//! 预订只能在开始前 24 小时以上取消。此判断仅用于控制界面
//! 是否提供取消按钮；服务端在取消请求上会再做一次权威校验，
//! 两边时钟不一致时以服务端的拒绝为准。

use chrono::{Duration, NaiveDateTime};

/// 取消所需的最少提前量（小时）
pub const CANCEL_NOTICE_HOURS: i64 = 24;

/// 判断某个预订此刻是否仍可取消
///
/// 规则：`start_at - now >= 24h`，边界取等号（恰好 24 小时可取消）。
/// `now` 由调用方注入，便于测试。
pub fn is_cancellable(start_at: NaiveDateTime, now: NaiveDateTime) -> bool {
    start_at - now >= Duration::hours(CANCEL_NOTICE_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn exactly_24_hours_ahead_is_cancellable() {
        let now = at(10, 0, 0);
        let start = now + Duration::hours(24);
        assert!(is_cancellable(start, now));
    }

    #[test]
    fn one_second_under_24_hours_is_not_cancellable() {
        let now = at(10, 0, 0);
        let start = now + Duration::hours(24) - Duration::seconds(1);
        assert!(!is_cancellable(start, now));
    }

    #[test]
    fn far_future_booking_is_cancellable() {
        let now = at(10, 0, 0);
        assert!(is_cancellable(now + Duration::days(30), now));
    }

    #[test]
    fn past_booking_is_not_cancellable() {
        let now = at(10, 0, 0);
        assert!(!is_cancellable(now - Duration::hours(1), now));
    }
}
