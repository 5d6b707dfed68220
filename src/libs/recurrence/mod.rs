//! Recurring task generation.
//!
//! The engine is split into small, independently usable pieces:
//!
//! - [`pattern`]: the [`RecurrencePattern`] value type, parsing and validation
//! - [`schedule`]: pure calendar arithmetic over `(pattern, anchor)`
//! - [`describe`]: human-readable summaries such as "Repeats every 2 weeks on Mon, Wed"
//! - [`engine`]: [`RecurrenceEngine`], which turns dates into task instances
//!   and handles pattern edits
//!
//! None of these modules perform I/O. Persisting what the engine produces is
//! the job of [`crate::db::tasks::Tasks`].

pub mod describe;
pub mod engine;
pub mod pattern;
pub mod schedule;

pub use describe::{describe_pattern, ordinal, CUSTOM_PATTERN};
pub use engine::{
    should_generate_next, Clock, FixedClock, IdSource, Occurrences, PatternUpdate, RandomIds, RecurrenceEngine, SystemClock,
    DEFAULT_LOOKAHEAD_COUNT, DEFAULT_PREVIEW_COUNT,
};
pub use pattern::{parse_weekdays, weekday_index, PatternError, RecurrenceKind, RecurrencePattern, MAX_INTERVAL, WEEKDAY_ABBREVIATIONS};
pub use schedule::{days_in_month, next_date, next_permitted_date, nth_date, upcoming_dates};
