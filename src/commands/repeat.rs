use super::{configured_engine, parse_date};
use crate::{
    db::tasks::Tasks,
    libs::{
        config::Config,
        messages::Message,
        recurrence::{parse_weekdays, PatternError, RecurrenceKind, RecurrencePattern},
        view::View,
    },
    msg_bail_anyhow, msg_error_anyhow, msg_print, msg_success,
};
use anyhow::Result;
use clap::{ArgGroup, Args};

/// Flags describing a recurrence pattern, shared by `task add` and `repeat`.
#[derive(Debug, Clone, Default, Args)]
pub struct PatternArgs {
    /// How the task repeats: daily, weekly, monthly or yearly
    #[arg(short, long, value_name = "KIND")]
    pub repeat: Option<String>,

    /// Number of days, weeks, months or years between occurrences
    #[arg(long, value_name = "N")]
    pub every: Option<u32>,

    /// Weekdays for weekly patterns, e.g. "mon,wed,fri" or "1,3,5"
    #[arg(long, value_name = "DAYS")]
    pub on: Option<String>,

    /// Day of month for monthly patterns (1-31)
    #[arg(long, value_name = "N")]
    pub day: Option<u32>,

    /// Last date an occurrence may fall on (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub until: Option<String>,
}

impl PatternArgs {
    /// True when any flag other than `--repeat` was given.
    pub fn has_modifiers(&self) -> bool {
        self.every.is_some() || self.on.is_some() || self.day.is_some() || self.until.is_some()
    }

    /// Builds and validates the pattern. `None` when no flag was given.
    pub fn to_pattern(&self) -> Result<Option<RecurrencePattern>> {
        let Some(kind) = &self.repeat else {
            if self.has_modifiers() {
                msg_bail_anyhow!(Message::PatternFlagsWithoutRepeat);
            }
            return Ok(None);
        };

        let kind: RecurrenceKind = kind.parse().map_err(invalid_pattern)?;
        let mut pattern = RecurrencePattern::new(kind, self.every.unwrap_or(1));

        if let Some(days) = &self.on {
            pattern = pattern.with_days_of_week(parse_weekdays(days).map_err(invalid_pattern)?);
        }
        if let Some(day) = self.day {
            pattern = pattern.with_day_of_month(day);
        }
        if let Some(until) = &self.until {
            pattern = pattern.with_end_date(parse_date(until)?);
        }

        pattern.validate().map_err(invalid_pattern)?;
        Ok(Some(pattern))
    }
}

fn invalid_pattern(error: PatternError) -> anyhow::Error {
    msg_error_anyhow!(Message::PatternInvalid(error.to_string()))
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("change").required(true).args(["repeat", "clear"])))]
pub struct RepeatArgs {
    /// Task id or unique id prefix
    id: String,

    #[command(flatten)]
    pattern: PatternArgs,

    /// Stop repeating and remove scheduled occurrences
    #[arg(long, conflicts_with_all = ["repeat", "every", "on", "day", "until"])]
    clear: bool,
}

pub fn cmd(args: RepeatArgs) -> Result<()> {
    if args.clear && (args.pattern.repeat.is_some() || args.pattern.has_modifiers()) {
        msg_bail_anyhow!(Message::PatternFlagsWithClear);
    }
    let pattern = if args.clear { None } else { args.pattern.to_pattern()? };

    let config = Config::read()?;
    let engine = configured_engine(&config);
    let mut tasks = Tasks::new()?;

    let task = tasks.resolve(&args.id)?;
    let update = tasks.apply_pattern(task.id, pattern, &engine)?;

    match &update.updated_task.recurring_pattern {
        Some(pattern) => {
            msg_print!(Message::PatternSummary(pattern.to_string()));
            msg_success!(Message::PatternUpdated {
                removed: update.instance_ids_to_remove.len(),
                generated: update.new_instances.len(),
            });
            if !update.new_instances.is_empty() {
                View::occurrences(&update.new_instances)?;
            }
        }
        None => msg_success!(Message::PatternCleared(update.instance_ids_to_remove.len())),
    }

    Ok(())
}
