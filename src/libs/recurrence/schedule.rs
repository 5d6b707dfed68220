//! Calendar arithmetic for recurrence patterns.
//!
//! Everything here is a pure function of `(pattern, anchor)`. The engine in
//! [`super::engine`] wraps these dates into task records; the CLI preview and
//! the tests call them directly.
//!
//! ## Rules by pattern type
//!
//! - **daily**: anchor + interval days
//! - **weekly**: anchor + interval weeks, or, with explicit weekdays, a
//!   forward scan over Sunday-based weeks (see [`next_listed_weekday`])
//! - **monthly**: anchor + interval months; an explicit day of month is
//!   clamped to the length of the target month
//! - **yearly**: anchor + interval years (29 February falls back to the 28th)
//!
//! A `None` result means the pattern cannot produce a further date: the type
//! is unrecognized, the weekday list names no valid day, or the arithmetic
//! left chrono's supported range.

use super::pattern::{weekday_index, RecurrenceKind, RecurrencePattern};
use chrono::{Datelike, Days, Months, NaiveDate};

/// Computes the date that follows `anchor` under `pattern`.
///
/// The end date is not consulted; see [`next_permitted_date`].
pub fn next_date(pattern: &RecurrencePattern, anchor: NaiveDate) -> Option<NaiveDate> {
    let interval = pattern.effective_interval();

    match pattern.kind {
        RecurrenceKind::Daily => anchor.checked_add_days(Days::new(u64::from(interval))),
        RecurrenceKind::Weekly => match pattern.explicit_weekdays() {
            Some(days) => next_listed_weekday(anchor, &days, interval),
            None => anchor.checked_add_days(Days::new(7 * u64::from(interval))),
        },
        RecurrenceKind::Monthly => match pattern.day_of_month {
            Some(day) => add_months_on_day(anchor, interval, day),
            None => anchor.checked_add_months(Months::new(interval)),
        },
        RecurrenceKind::Yearly => anchor.checked_add_months(Months::new(interval.checked_mul(12)?)),
        RecurrenceKind::Unrecognized => None,
    }
}

/// Like [`next_date`], but returns `None` once the candidate falls strictly
/// after the pattern's end date.
pub fn next_permitted_date(pattern: &RecurrencePattern, anchor: NaiveDate) -> Option<NaiveDate> {
    next_date(pattern, anchor).filter(|candidate| pattern.permits(*candidate))
}

/// The `n`-th date after `anchor` (`n = 1` is the immediate next date).
///
/// Recomputed from the anchor on every call; `n = 0` yields the anchor itself.
pub fn nth_date(pattern: &RecurrencePattern, anchor: NaiveDate, n: usize) -> Option<NaiveDate> {
    (0..n).try_fold(anchor, |current, _| next_permitted_date(pattern, current))
}

/// Up to `count` consecutive dates after `anchor`, stopping at the end date.
pub fn upcoming_dates(pattern: &RecurrencePattern, anchor: NaiveDate, count: usize) -> Vec<NaiveDate> {
    std::iter::successors(next_permitted_date(pattern, anchor), |current| next_permitted_date(pattern, *current))
        .take(count)
        .collect()
}

/// Finds the next listed weekday after `anchor`.
///
/// Weeks start on Sunday. A listed weekday is accepted while still inside
/// the anchor's own week, or from the week that starts `interval` weeks after
/// the anchor's week onwards. With an interval of 1 this is simply the next
/// listed weekday. At most 13 days are inspected whatever the interval.
fn next_listed_weekday(anchor: NaiveDate, days: &[u8], interval: u32) -> Option<NaiveDate> {
    if days.is_empty() {
        return None;
    }
    let listed = |date: &NaiveDate| days.contains(&weekday_index(date.weekday()));

    let offset = weekday_index(anchor.weekday());
    let mut candidate = anchor;
    for _ in offset..6 {
        candidate = candidate.succ_opt()?;
        if listed(&candidate) {
            return Some(candidate);
        }
    }

    let window_start = anchor
        .checked_sub_days(Days::new(u64::from(offset)))?
        .checked_add_days(Days::new(7 * u64::from(interval)))?;
    std::iter::successors(Some(window_start), |date| date.succ_opt()).take(7).find(listed)
}

/// Adds `months` to `anchor` and lands on `day`, clamped to the target
/// month's last day.
fn add_months_on_day(anchor: NaiveDate, months: u32, day: u32) -> Option<NaiveDate> {
    let first_of_target = anchor.with_day(1)?.checked_add_months(Months::new(months))?;
    let day = day.clamp(1, days_in_month(first_of_target.year(), first_of_target.month())?);
    first_of_target.with_day(day)
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = first.checked_add_months(Months::new(1))?;
    Some(next_first.signed_duration_since(first).num_days() as u32)
}
