//! Task records shared by the recurrence engine, the store and the CLI.
//!
//! A task is either a plain to-do, a recurring *anchor* (carries
//! `is_recurring = true` and a [`RecurrencePattern`]), or an *instance*
//! generated from an anchor. Instances copy every field of the task they were
//! generated from, so they also carry the pattern; that equality is how the
//! engine later recognises them.

use crate::libs::recurrence::RecurrencePattern;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub type TaskId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!("unknown task status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(format!("unknown task priority '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub comment: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub parent_task_id: Option<TaskId>,
    pub is_recurring: bool,
    pub recurring_pattern: Option<RecurrencePattern>,
}

impl Task {
    /// Creates a non-recurring to-do with a random id, stamped with the
    /// current time.
    pub fn new(name: &str, comment: &str) -> Self {
        Task {
            id: Uuid::new_v4(),
            name: name.to_string(),
            comment: comment.to_string(),
            status: TaskStatus::Todo,
            priority: TaskPriority::default(),
            completed: false,
            completed_at: None,
            due_date: None,
            created_at: Utc::now(),
            parent_task_id: None,
            is_recurring: false,
            recurring_pattern: None,
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Turns the task into a recurring anchor, or back into a plain task
    /// when `pattern` is `None`.
    pub fn with_pattern(mut self, pattern: Option<RecurrencePattern>) -> Self {
        self.is_recurring = pattern.is_some();
        self.recurring_pattern = pattern;
        self
    }

    /// Leading 8 hex digits of the id, enough to address a task from the CLI.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    pub fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.completed = true;
        self.completed_at = Some(at);
        self.status = TaskStatus::Done;
    }
}

#[derive(Debug, Clone)]
pub enum TaskFilter {
    All,
    /// Tasks that are not completed yet.
    Open,
    /// Recurring anchors and instances.
    Recurring,
    ByIds(Vec<TaskId>),
}
