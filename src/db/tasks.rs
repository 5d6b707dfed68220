//! Task persistence and the recurrence workflows that act on stored tasks.
//!
//! [`Tasks`] is the caller the recurrence engine was designed for: it owns
//! storage, decides which stored tasks count as "future", and applies what
//! the engine computes.
//!
//! ## Features
//!
//! - **CRUD Operations**: Insert, fetch, update and delete task records
//! - **Short Ids**: Resolve a task from a unique id prefix
//! - **Completion Flow**: Completing a recurring task stores its next
//!   occurrence in the same transaction
//! - **Pattern Edits**: Removals and the regenerated batch are applied
//!   atomically, so readers never see both the old and the new series
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cadence::db::tasks::Tasks;
//! use cadence::libs::recurrence::{RecurrenceEngine, RecurrencePattern};
//! use cadence::libs::task::Task;
//!
//! let engine = RecurrenceEngine::new();
//! let mut tasks = Tasks::new()?;
//!
//! let anchor = Task::new("Standup", "").with_pattern(Some(RecurrencePattern::daily(1)));
//! tasks.insert(&anchor)?;
//! let update = tasks.apply_pattern(anchor.id, Some(RecurrencePattern::weekly(1)), &engine)?;
//! println!("scheduled {} occurrences", update.new_instances.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::db::Db;
use crate::libs::messages::Message;
use crate::libs::recurrence::{should_generate_next, Clock, IdSource, PatternUpdate, RecurrenceEngine, RecurrencePattern};
use crate::libs::task::{Task, TaskFilter, TaskId};
use crate::{msg_bail_anyhow, msg_error_anyhow};
use anyhow::Result;
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;
use uuid::Uuid;

const TASK_COLUMNS: &str = "id, name, comment, status, priority, completed, completed_at, due_date, created_at, parent_task_id, is_recurring, recurring_pattern";
const INSERT_TASK: &str = "INSERT INTO tasks (id, name, comment, status, priority, completed, completed_at, due_date, created_at, parent_task_id, is_recurring, recurring_pattern) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const UPDATE_TASK: &str = "UPDATE tasks SET name = ?2, comment = ?3, status = ?4, priority = ?5, completed = ?6, completed_at = ?7, due_date = ?8, created_at = ?9, parent_task_id = ?10, is_recurring = ?11, recurring_pattern = ?12 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const ORDER_BY_DUE: &str = "ORDER BY due_date IS NULL, due_date, created_at";
const WHERE_ID: &str = "WHERE id = ?1";
const WHERE_ID_PREFIX: &str = "WHERE substr(id, 1, length(?1)) = ?1";
const WHERE_OPEN: &str = "WHERE completed = FALSE";
const WHERE_RECURRING: &str = "WHERE is_recurring = TRUE";
const WHERE_SCHEDULED_OCCURRENCE: &str = "WHERE completed = FALSE AND name = ?1 AND recurring_pattern = ?2 AND due_date = ?3";

/// What happened to the series when a task was completed.
#[derive(Debug, Clone, PartialEq)]
pub enum NextOccurrence {
    /// The completed task does not repeat.
    NotRecurring,
    /// A new occurrence was generated and stored.
    Scheduled(Task),
    /// An open task of the same series is already due on the next date.
    /// Carries the occurrence that was computed but not stored.
    AlreadyScheduled(Task),
    /// The pattern has no further date (end date reached or malformed).
    SeriesFinished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub task: Task,
    pub next: NextOccurrence,
}

pub struct Tasks {
    pub conn: Connection,
}

impl Tasks {
    /// Opens the task store in the user's data directory.
    pub fn new() -> Result<Tasks> {
        let db = Db::new()?;
        Ok(Tasks { conn: db.conn })
    }

    /// Opens the task store backed by the database file at `path`.
    pub fn open(path: &Path) -> Result<Tasks> {
        let db = Db::open(path)?;
        Ok(Tasks { conn: db.conn })
    }

    pub fn insert(&mut self, task: &Task) -> Result<()> {
        insert_task(&self.conn, task)
    }

    /// Inserts all tasks or none.
    pub fn insert_many(&mut self, tasks: &[Task]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for task in tasks {
            insert_task(&tx, task)?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn get_by_id(&mut self, id: TaskId) -> Result<Option<Task>> {
        get_task(&self.conn, id)
    }

    /// Tasks whose id starts with `prefix` (case-insensitive).
    ///
    /// Only hex digits and `-` can match; anything else, including an empty
    /// prefix, matches nothing.
    pub fn find_by_prefix(&mut self, prefix: &str) -> Result<Vec<Task>> {
        let prefix = prefix.trim().to_ascii_lowercase();
        if let Ok(id) = Uuid::parse_str(&prefix) {
            return Ok(self.get_by_id(id)?.into_iter().collect());
        }
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
            return Ok(Vec::new());
        }
        query_tasks(&self.conn, &format!("{} {}", WHERE_ID_PREFIX, ORDER_BY_DUE), [prefix])
    }

    /// Resolves a single task from a full id or a unique prefix.
    pub fn resolve(&mut self, id_or_prefix: &str) -> Result<Task> {
        let mut matches = self.find_by_prefix(id_or_prefix)?;
        match matches.len() {
            0 => msg_bail_anyhow!(Message::TaskNotFound(id_or_prefix.to_string())),
            1 => Ok(matches.remove(0)),
            count => msg_bail_anyhow!(Message::TaskIdAmbiguous(id_or_prefix.to_string(), count)),
        }
    }

    pub fn fetch(&mut self, filter: TaskFilter) -> Result<Vec<Task>> {
        fetch_tasks(&self.conn, filter)
    }

    pub fn update(&mut self, task: &Task) -> Result<()> {
        update_task(&self.conn, task)
    }

    /// Deletes a task and returns the number of removed rows.
    pub fn delete(&mut self, id: TaskId) -> Result<usize> {
        Ok(self.conn.execute(DELETE_TASK, params![id.to_string()])?)
    }

    /// Deletes every listed task in one transaction.
    pub fn delete_many(&mut self, ids: &[TaskId]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let deleted = delete_tasks(&tx, ids)?;
        tx.commit()?;
        Ok(deleted)
    }

    /// Marks a task completed and, if it repeats, stores its next occurrence.
    ///
    /// Both writes happen in one transaction. The next occurrence is not
    /// stored again when an open task of the same series (same name and
    /// pattern) is already due on that date (e.g. from the lookahead batch of a pattern edit).
    pub fn complete<C: Clock, I: IdSource>(&mut self, id: TaskId, engine: &RecurrenceEngine<C, I>) -> Result<Completion> {
        let tx = self.conn.transaction()?;

        let mut task = get_task(&tx, id)?.ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(id.to_string())))?;
        if task.completed {
            msg_bail_anyhow!(Message::TaskAlreadyCompleted(task.name));
        }

        task.mark_completed(engine.clock().now());
        update_task(&tx, &task)?;

        let next = if !should_generate_next(&task) {
            NextOccurrence::NotRecurring
        } else {
            match engine.next_occurrence(&task) {
                None => NextOccurrence::SeriesFinished,
                Some(occurrence) => {
                    if is_already_scheduled(&tx, &occurrence)? {
                        tracing::debug!(task = %task.id, due = ?occurrence.due_date, "next occurrence already stored");
                        NextOccurrence::AlreadyScheduled(occurrence)
                    } else {
                        insert_task(&tx, &occurrence)?;
                        NextOccurrence::Scheduled(occurrence)
                    }
                }
            }
        };

        tx.commit()?;
        tracing::info!(task = %task.id, "task completed");

        Ok(Completion { task, next })
    }

    /// Replaces (or clears) the pattern of a stored task.
    ///
    /// The engine sees the open tasks of the same series (same name, not
    /// completed) as the future instances. The anchor update, the removals
    /// and the new batch are committed together.
    ///
    /// # Errors
    ///
    /// Fails if the task does not exist or `pattern` does not validate.
    pub fn apply_pattern<C: Clock, I: IdSource>(
        &mut self,
        id: TaskId,
        pattern: Option<RecurrencePattern>,
        engine: &RecurrenceEngine<C, I>,
    ) -> Result<PatternUpdate> {
        if let Some(pattern) = &pattern {
            pattern.validate().map_err(|e| msg_error_anyhow!(Message::PatternInvalid(e.to_string())))?;
        }

        let tx = self.conn.transaction()?;

        let task = get_task(&tx, id)?.ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(id.to_string())))?;
        let series: Vec<Task> = fetch_tasks(&tx, TaskFilter::Open)?.into_iter().filter(|t| t.name == task.name).collect();

        let update = engine.update_pattern(&task, pattern, &series);

        update_task(&tx, &update.updated_task)?;
        delete_tasks(&tx, &update.instance_ids_to_remove)?;
        for instance in &update.new_instances {
            insert_task(&tx, instance)?;
        }

        tx.commit()?;
        Ok(update)
    }
}

fn insert_task(conn: &Connection, task: &Task) -> Result<()> {
    conn.execute(
        INSERT_TASK,
        params![
            task.id.to_string(),
            task.name,
            task.comment,
            task.status.as_str(),
            task.priority.as_str(),
            task.completed,
            task.completed_at,
            task.due_date,
            task.created_at,
            task.parent_task_id.map(|id| id.to_string()),
            task.is_recurring,
            pattern_to_json(task.recurring_pattern.as_ref())?,
        ],
    )?;
    Ok(())
}

fn update_task(conn: &Connection, task: &Task) -> Result<()> {
    let affected = conn.execute(
        UPDATE_TASK,
        params![
            task.id.to_string(),
            task.name,
            task.comment,
            task.status.as_str(),
            task.priority.as_str(),
            task.completed,
            task.completed_at,
            task.due_date,
            task.created_at,
            task.parent_task_id.map(|id| id.to_string()),
            task.is_recurring,
            pattern_to_json(task.recurring_pattern.as_ref())?,
        ],
    )?;
    if affected == 0 {
        msg_bail_anyhow!(Message::TaskNotFound(task.id.to_string()));
    }
    Ok(())
}

fn delete_tasks(conn: &Connection, ids: &[TaskId]) -> Result<usize> {
    let mut deleted = 0;
    for id in ids {
        deleted += conn.execute(DELETE_TASK, params![id.to_string()])?;
    }
    Ok(deleted)
}

fn get_task(conn: &Connection, id: TaskId) -> Result<Option<Task>> {
    let sql = format!("SELECT {} FROM tasks {}", TASK_COLUMNS, WHERE_ID);
    Ok(conn.query_row(&sql, params![id.to_string()], row_to_task).optional()?)
}

fn fetch_tasks(conn: &Connection, filter: TaskFilter) -> Result<Vec<Task>> {
    match filter {
        TaskFilter::All => query_tasks(conn, ORDER_BY_DUE, []),
        TaskFilter::Open => query_tasks(conn, &format!("{} {}", WHERE_OPEN, ORDER_BY_DUE), []),
        TaskFilter::Recurring => query_tasks(conn, &format!("{} {}", WHERE_RECURRING, ORDER_BY_DUE), []),
        TaskFilter::ByIds(ids) => {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            let clause = format!("WHERE id IN ({}) {}", vec!["?"; ids.len()].join(", "), ORDER_BY_DUE);
            query_tasks(conn, &clause, params_from_iter(ids.iter().map(|id| id.to_string())))
        }
    }
}

fn query_tasks<P: rusqlite::Params>(conn: &Connection, clause: &str, params: P) -> Result<Vec<Task>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM tasks {}", TASK_COLUMNS, clause))?;
    let task_iter = stmt.query_map(params, row_to_task)?;

    let mut tasks = Vec::new();
    for task in task_iter {
        tasks.push(task?);
    }
    Ok(tasks)
}

fn is_already_scheduled(conn: &Connection, occurrence: &Task) -> Result<bool> {
    let sql = format!("SELECT COUNT(*) FROM tasks {}", WHERE_SCHEDULED_OCCURRENCE);
    let count: i64 = conn.query_row(
        &sql,
        params![occurrence.name, pattern_to_json(occurrence.recurring_pattern.as_ref())?, occurrence.due_date],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn pattern_to_json(pattern: Option<&RecurrencePattern>) -> Result<Option<String>> {
    Ok(pattern.map(serde_json::to_string).transpose()?)
}

fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    let pattern: Option<String> = row.get(11)?;
    let recurring_pattern = pattern
        .map(|json| serde_json::from_str::<RecurrencePattern>(&json))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(11, Type::Text, e.into()))?;

    Ok(Task {
        id: parse_id(row, 0)?,
        name: row.get(1)?,
        comment: row.get(2)?,
        status: parse_text(row, 3)?,
        priority: parse_text(row, 4)?,
        completed: row.get(5)?,
        completed_at: row.get(6)?,
        due_date: row.get(7)?,
        created_at: row.get(8)?,
        parent_task_id: row.get::<_, Option<String>>(9)?.map(|s| to_uuid(9, &s)).transpose()?,
        is_recurring: row.get(10)?,
        recurring_pattern,
    })
}

fn parse_id(row: &Row, idx: usize) -> rusqlite::Result<Uuid> {
    to_uuid(idx, &row.get::<_, String>(idx)?)
}

fn to_uuid(idx: usize, value: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

fn parse_text<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    row.get::<_, String>(idx)?
        .parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}
