//! Human-readable pattern summaries.

use super::pattern::{RecurrenceKind, RecurrencePattern, WEEKDAY_ABBREVIATIONS};
use std::fmt;

/// Returned for pattern types this version cannot describe.
pub const CUSTOM_PATTERN: &str = "Custom pattern";

/// Summarises a pattern, e.g. `"Repeats every 2 weeks on Mon, Wed"`.
///
/// With an interval of 1 the unit is used adverbially ("Repeats daily");
/// otherwise the text reads "every N units". Weekly days keep the order they
/// were given in. An end date is appended as `until YYYY-MM-DD`.
pub fn describe_pattern(pattern: &RecurrencePattern) -> String {
    let (plural, adverb) = match pattern.kind {
        RecurrenceKind::Daily => ("days", "daily"),
        RecurrenceKind::Weekly => ("weeks", "weekly"),
        RecurrenceKind::Monthly => ("months", "monthly"),
        RecurrenceKind::Yearly => ("years", "yearly"),
        RecurrenceKind::Unrecognized => return CUSTOM_PATTERN.to_string(),
    };

    let mut text = match pattern.interval {
        0 | 1 => format!("Repeats {}", adverb),
        n => format!("Repeats every {} {}", n, plural),
    };

    match pattern.kind {
        RecurrenceKind::Weekly => {
            if let Some(days) = pattern.explicit_weekdays().filter(|days| !days.is_empty()) {
                let names: Vec<&str> = days.iter().map(|d| WEEKDAY_ABBREVIATIONS[*d as usize]).collect();
                text.push_str(&format!(" on {}", names.join(", ")));
            }
        }
        RecurrenceKind::Monthly => {
            if let Some(day) = pattern.day_of_month {
                text.push_str(&format!(" on the {}", ordinal(day)));
            }
        }
        _ => {}
    }

    if let Some(end) = pattern.end_date {
        text.push_str(&format!(" until {}", end.format("%Y-%m-%d")));
    }

    text
}

/// English ordinal for a day number: 1st, 2nd, 3rd, 4th, 11th, 21st...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

impl fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&describe_pattern(self))
    }
}
