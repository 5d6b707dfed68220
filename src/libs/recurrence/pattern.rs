//! Recurrence pattern value types and boundary validation.
//!
//! A [`RecurrencePattern`] describes how often a task repeats. Patterns are
//! stored alongside tasks as JSON, so the serialized shape uses the same
//! camelCase field names the rest of the task data uses (`type`,
//! `interval`, `endDate`, `daysOfWeek`, `dayOfMonth`).
//!
//! ## Validation
//!
//! The engine accepts any pattern and degrades malformed ones to "no further
//! occurrences". Input coming from a user goes through
//! [`RecurrencePattern::validate`] first, which rejects patterns that could
//! never describe a forward-moving cadence.
//!
//! ## Usage
//!
//! ```rust
//! use cadence::libs::recurrence::{RecurrenceKind, RecurrencePattern};
//!
//! let pattern = RecurrencePattern::new(RecurrenceKind::Weekly, 2).with_days_of_week(vec![1, 3]);
//! assert!(pattern.validate().is_ok());
//! ```

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Three-letter weekday abbreviations indexed by weekday number (0 = Sunday).
pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Largest interval accepted from user input.
pub const MAX_INTERVAL: u32 = 1000;

/// Errors raised when a pattern is accepted from user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Unknown repeat type '{0}'. Use daily, weekly, monthly or yearly")]
    UnknownKind(String),

    #[error("Repeat interval must be at least 1")]
    ZeroInterval,

    #[error("Repeat interval must be at most {max}, got {0}", max = MAX_INTERVAL)]
    IntervalTooLarge(u32),

    #[error("Day of month must be between 1 and 31, got {0}")]
    DayOfMonthOutOfRange(u32),

    #[error("Weekday index must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    WeekdayOutOfRange(u8),

    #[error("Unknown weekday '{0}'")]
    UnknownWeekday(String),

    #[error("Days of week only apply to weekly patterns")]
    DaysOfWeekNotWeekly,

    #[error("Day of month only applies to monthly patterns")]
    DayOfMonthNotMonthly,
}

/// Unit of repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Any type string this version does not know. Lets such a pattern load
    /// instead of failing the whole row. The original string is not kept:
    /// it is written back as `"unrecognized"`. Never produces occurrences.
    #[serde(other)]
    Unrecognized,
}

impl RecurrenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceKind::Daily => "daily",
            RecurrenceKind::Weekly => "weekly",
            RecurrenceKind::Monthly => "monthly",
            RecurrenceKind::Yearly => "yearly",
            RecurrenceKind::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrenceKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(RecurrenceKind::Daily),
            "weekly" | "week" => Ok(RecurrenceKind::Weekly),
            "monthly" | "month" => Ok(RecurrenceKind::Monthly),
            "yearly" | "year" | "annually" => Ok(RecurrenceKind::Yearly),
            other => Err(PatternError::UnknownKind(other.to_string())),
        }
    }
}

/// Describes how a task repeats.
///
/// Equality is structural and is what the engine uses to recognise
/// instances generated under a given pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePattern {
    #[serde(rename = "type")]
    pub kind: RecurrenceKind,

    /// Number of units between occurrences. Expected to be at least 1.
    pub interval: u32,

    /// No occurrence is generated strictly after this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    /// Weekday indices (0 = Sunday .. 6 = Saturday). Weekly only; the
    /// order given by the user is preserved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<u8>>,

    /// Target day of month (1-31). Monthly only; clamped to the length of
    /// the target month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
}

impl RecurrencePattern {
    pub fn new(kind: RecurrenceKind, interval: u32) -> Self {
        Self {
            kind,
            interval,
            end_date: None,
            days_of_week: None,
            day_of_month: None,
        }
    }

    pub fn daily(interval: u32) -> Self {
        Self::new(RecurrenceKind::Daily, interval)
    }

    pub fn weekly(interval: u32) -> Self {
        Self::new(RecurrenceKind::Weekly, interval)
    }

    pub fn monthly(interval: u32) -> Self {
        Self::new(RecurrenceKind::Monthly, interval)
    }

    pub fn yearly(interval: u32) -> Self {
        Self::new(RecurrenceKind::Yearly, interval)
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_days_of_week(mut self, days: Vec<u8>) -> Self {
        self.days_of_week = Some(days);
        self
    }

    pub fn with_day_of_month(mut self, day: u32) -> Self {
        self.day_of_month = Some(day);
        self
    }

    /// Interval the calendar arithmetic actually uses. A zero interval would
    /// never move forward, so it is treated as 1.
    pub fn effective_interval(&self) -> u32 {
        self.interval.max(1)
    }

    /// Weekday indices that name a real weekday, in pattern order.
    ///
    /// Returns `None` when no explicit days are set (or the list is empty),
    /// which means "same weekday as the anchor".
    pub fn explicit_weekdays(&self) -> Option<Vec<u8>> {
        match &self.days_of_week {
            Some(days) if !days.is_empty() => Some(days.iter().copied().filter(|d| *d <= 6).collect()),
            _ => None,
        }
    }

    /// Whether `date` is still inside the series' end boundary.
    pub fn permits(&self, date: NaiveDate) -> bool {
        match self.end_date {
            Some(end) => date <= end,
            None => true,
        }
    }

    /// Checks a pattern accepted from user input.
    ///
    /// The engine itself never calls this; it tolerates malformed patterns by
    /// producing no occurrences.
    pub fn validate(&self) -> Result<(), PatternError> {
        if self.kind == RecurrenceKind::Unrecognized {
            return Err(PatternError::UnknownKind(self.kind.to_string()));
        }
        if self.interval == 0 {
            return Err(PatternError::ZeroInterval);
        }
        if self.interval > MAX_INTERVAL {
            return Err(PatternError::IntervalTooLarge(self.interval));
        }

        if let Some(days) = &self.days_of_week {
            if !days.is_empty() && self.kind != RecurrenceKind::Weekly {
                return Err(PatternError::DaysOfWeekNotWeekly);
            }
            if let Some(bad) = days.iter().find(|d| **d > 6) {
                return Err(PatternError::WeekdayOutOfRange(*bad));
            }
        }

        if let Some(day) = self.day_of_month {
            if self.kind != RecurrenceKind::Monthly {
                return Err(PatternError::DayOfMonthNotMonthly);
            }
            if !(1..=31).contains(&day) {
                return Err(PatternError::DayOfMonthOutOfRange(day));
            }
        }

        Ok(())
    }
}

/// Converts a chrono weekday to the Sunday-based index used by patterns.
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// Parses a comma-separated weekday list such as `"mon,wed,fri"` or
/// `"1,3,5"`. Order is preserved and duplicates are dropped.
pub fn parse_weekdays(input: &str) -> Result<Vec<u8>, PatternError> {
    let mut days = Vec::new();

    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let index = match token.parse::<u8>() {
            Ok(n) if n <= 6 => n,
            Ok(n) => return Err(PatternError::WeekdayOutOfRange(n)),
            Err(_) => {
                let weekday = token.parse::<Weekday>().map_err(|_| PatternError::UnknownWeekday(token.to_string()))?;
                weekday_index(weekday)
            }
        };
        if !days.contains(&index) {
            days.push(index);
        }
    }

    Ok(days)
}
