//! Notification window predicates.
//!
//! Pure timing policy, separated from the scan loop so it can be tested
//! exhaustively against the boundary instants.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Due instant = calendar date at HH:MM, zero seconds.
pub fn due_instant(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Is `now` inside the notification window of an item due at `due` with
/// the given minutes-before offset?
///
/// Window semantics (behavior-compatible, intentionally preserved):
/// - `offset_min == 0`: fires ONLY during the exact calendar minute of
///   the due instant (same day, hour and minute as "now") — a narrow
///   one-minute window, not an open interval. If no scan tick lands in
///   that minute (process asleep, tab backgrounded), the notification is
///   silently missed. This is a known gap, not a delivery guarantee.
/// - `offset_min > 0`: fires on the closed interval
///   `[due - offset, due]`; any tick landing inside queues the item, and
///   later ticks are suppressed by the scheduler's already-pending check.
pub fn in_notification_window(due: NaiveDateTime, offset_min: u32, now: NaiveDateTime) -> bool {
    if offset_min == 0 {
        return now.date() == due.date() && now.hour() == due.hour() && now.minute() == due.minute();
    }

    let window_start = due - Duration::minutes(i64::from(offset_min));
    window_start <= now && now <= due
}
