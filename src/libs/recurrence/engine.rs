//! Occurrence generation for recurring tasks.
//!
//! [`RecurrenceEngine`] turns a recurring task into the task records that
//! follow it. It owns no storage and keeps no cursor: every call recomputes
//! from the task it is given. Two things that would otherwise be ambient are
//! injected instead:
//!
//! - a [`Clock`], used when a task has no due date and for `created_at`
//! - an [`IdSource`], used to give every generated instance a fresh id
//!
//! ## Lifecycle
//!
//! ```text
//! NonRecurring ──assign pattern──▶ Recurring(p) ──edit──▶ Recurring(p')
//!       ▲                               │
//!       └────────── clear pattern ──────┘
//! ```
//!
//! - completing an instance: [`should_generate_next`] then
//!   [`RecurrenceEngine::next_occurrence`]
//! - editing or clearing a pattern: [`RecurrenceEngine::update_pattern`],
//!   whose removals and insertions the caller applies together
//!
//! A `None` or an empty batch is never an error. It means the series is
//! exhausted (end date reached) or the pattern cannot produce dates.
//!
//! ## Usage
//!
//! ```rust
//! use cadence::libs::recurrence::{RecurrenceEngine, RecurrencePattern};
//! use cadence::libs::task::Task;
//! use chrono::NaiveDate;
//!
//! let engine = RecurrenceEngine::new();
//! let anchor = Task::new("Water plants", "")
//!     .with_due_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     .with_pattern(Some(RecurrencePattern::daily(3)));
//!
//! let next = engine.next_occurrence(&anchor).unwrap();
//! assert_eq!(next.due_date, NaiveDate::from_ymd_opt(2024, 1, 4));
//! ```

use super::pattern::RecurrencePattern;
use super::schedule::next_date;
use crate::libs::task::{Task, TaskId, TaskStatus};
use chrono::{DateTime, Local, NaiveDate, Utc};
use uuid::Uuid;

/// Batch size for a one-shot preview of upcoming occurrences.
pub const DEFAULT_PREVIEW_COUNT: usize = 10;

/// Batch size regenerated after a pattern edit.
pub const DEFAULT_LOOKAHEAD_COUNT: usize = 5;

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date used as the anchor for tasks without a due date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock. `today` follows the local calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Source of identities for generated instances. Must be collision resistant.
pub trait IdSource {
    fn next_id(&self) -> TaskId;
}

/// Random UUID v4 identities.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self) -> TaskId {
        Uuid::new_v4()
    }
}

/// Outcome of editing or clearing a task's pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternUpdate {
    /// The anchor with `is_recurring` and `recurring_pattern` replaced.
    pub updated_task: Task,
    /// Freshly generated instances under the new pattern.
    pub new_instances: Vec<Task>,
    /// Instances generated under the old pattern that should be deleted.
    pub instance_ids_to_remove: Vec<TaskId>,
}

/// True when `task` is a completed recurring task, i.e. the caller should ask
/// for its next occurrence.
pub fn should_generate_next(task: &Task) -> bool {
    task.is_recurring && task.recurring_pattern.is_some() && task.completed
}

#[derive(Debug, Clone)]
pub struct RecurrenceEngine<C = SystemClock, I = RandomIds> {
    clock: C,
    ids: I,
    lookahead: usize,
}

impl RecurrenceEngine {
    pub fn new() -> Self {
        Self::with_parts(SystemClock, RandomIds)
    }
}

impl Default for RecurrenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, I: IdSource> RecurrenceEngine<C, I> {
    pub fn with_parts(clock: C, ids: I) -> Self {
        Self {
            clock,
            ids,
            lookahead: DEFAULT_LOOKAHEAD_COUNT,
        }
    }

    /// Overrides how many instances [`Self::update_pattern`] generates.
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Builds the occurrence that follows `base`.
    ///
    /// The anchor date is `base.due_date`, or the clock's current date when
    /// the task has none. The new record copies `base` except for a fresh id,
    /// the advanced due date, a reset completion state, `status = todo`,
    /// `created_at = now` and no parent linkage.
    ///
    /// Returns `None` if `base` is not recurring, carries no pattern, the
    /// pattern produces no date, or the date lies after the pattern's end.
    pub fn next_occurrence(&self, base: &Task) -> Option<Task> {
        if !base.is_recurring {
            return None;
        }
        let pattern = base.recurring_pattern.as_ref()?;

        let anchor = base.due_date.unwrap_or_else(|| self.clock.today());
        let Some(candidate) = next_date(pattern, anchor) else {
            tracing::debug!(task = %base.id, kind = %pattern.kind, "pattern yields no further date");
            return None;
        };
        if !pattern.permits(candidate) {
            tracing::debug!(task = %base.id, %candidate, "series exhausted at end date");
            return None;
        }

        Some(Task {
            id: self.ids.next_id(),
            due_date: Some(candidate),
            completed: false,
            completed_at: None,
            status: TaskStatus::Todo,
            created_at: self.clock.now(),
            parent_task_id: None,
            ..base.clone()
        })
    }

    /// Lazily chains [`Self::next_occurrence`] starting from `base`.
    ///
    /// The iterator ends at the first `None`. It is not restartable; call
    /// again to recompute from scratch.
    pub fn occurrences<'a>(&'a self, base: &Task) -> Occurrences<'a, C, I> {
        Occurrences {
            engine: self,
            current: Some(base.clone()),
        }
    }

    /// Up to `count` upcoming occurrences of `base`, in due-date order.
    ///
    /// Returns fewer than `count` when the series ends early. Use
    /// [`DEFAULT_PREVIEW_COUNT`] for a preview.
    pub fn future_occurrences(&self, base: &Task, count: usize) -> Vec<Task> {
        let occurrences: Vec<Task> = self.occurrences(base).take(count).collect();
        tracing::trace!(task = %base.id, requested = count, generated = occurrences.len(), "generated future occurrences");
        occurrences
    }

    /// Replaces the pattern of `task` and works out which instances to swap.
    ///
    /// An existing task (other than `task` itself) is scheduled for removal
    /// when either its `parent_task_id` points at `task`, or its pattern
    /// equals the pattern `task` had before the edit. Both rules are applied.
    /// `existing` should only hold the instances the caller considers future;
    /// the engine does not look at dates here.
    ///
    /// When `new_pattern` is set, [`Self::lookahead`] instances are generated
    /// from the updated anchor. Nothing is persisted.
    pub fn update_pattern(&self, task: &Task, new_pattern: Option<RecurrencePattern>, existing: &[Task]) -> PatternUpdate {
        let old_pattern = task.recurring_pattern.as_ref();

        let instance_ids_to_remove = existing
            .iter()
            .filter(|other| other.id != task.id)
            .filter(|other| {
                let linked = other.parent_task_id == Some(task.id);
                let same_pattern = old_pattern.is_some() && other.recurring_pattern.as_ref() == old_pattern;
                linked || same_pattern
            })
            .map(|other| other.id)
            .collect::<Vec<_>>();

        let has_pattern = new_pattern.is_some();
        let updated_task = task.clone().with_pattern(new_pattern);

        let new_instances = if has_pattern {
            self.future_occurrences(&updated_task, self.lookahead)
        } else {
            Vec::new()
        };

        tracing::debug!(
            task = %task.id,
            removed = instance_ids_to_remove.len(),
            generated = new_instances.len(),
            "recurrence pattern updated"
        );

        PatternUpdate {
            updated_task,
            new_instances,
            instance_ids_to_remove,
        }
    }
}

/// Iterator returned by [`RecurrenceEngine::occurrences`].
pub struct Occurrences<'a, C, I> {
    engine: &'a RecurrenceEngine<C, I>,
    current: Option<Task>,
}

impl<C: Clock, I: IdSource> Iterator for Occurrences<'_, C, I> {
    type Item = Task;

    fn next(&mut self) -> Option<Task> {
        let base = self.current.take()?;
        let next = self.engine.next_occurrence(&base)?;
        self.current = Some(next.clone());
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_engine() -> RecurrenceEngine<FixedClock, RandomIds> {
        RecurrenceEngine::with_parts(FixedClock(Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()), RandomIds)
    }

    #[test]
    fn missing_due_date_anchors_on_clock() {
        let engine = fixed_engine();
        let task = Task::new("Stretch", "").with_pattern(Some(RecurrencePattern::daily(1)));
        let next = engine.next_occurrence(&task).unwrap();
        assert_eq!(next.due_date, NaiveDate::from_ymd_opt(2024, 3, 11));
        assert_eq!(next.created_at, engine.clock().now());
    }

    #[test]
    fn non_recurring_flag_wins_over_pattern() {
        let engine = fixed_engine();
        let mut task = Task::new("Stretch", "").with_pattern(Some(RecurrencePattern::daily(1)));
        task.is_recurring = false;
        assert!(engine.next_occurrence(&task).is_none());
        assert!(engine.future_occurrences(&task, 3).is_empty());
    }

    #[test]
    fn should_generate_next_requires_completion() {
        let mut task = Task::new("Stretch", "").with_pattern(Some(RecurrencePattern::daily(1)));
        assert!(!should_generate_next(&task));
        task.mark_completed(Utc::now());
        assert!(should_generate_next(&task));
        task.recurring_pattern = None;
        assert!(!should_generate_next(&task));
    }

    #[test]
    fn lookahead_is_configurable() {
        let engine = fixed_engine().with_lookahead(2);
        let task = Task::new("Stretch", "").with_pattern(None);
        let update = engine.update_pattern(&task, Some(RecurrencePattern::daily(1)), &[]);
        assert_eq!(update.new_instances.len(), 2);
        assert!(update.updated_task.is_recurring);
    }
}
