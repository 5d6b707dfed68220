//! SQLite persistence for cadence.
//!
//! The recurrence engine computes, this layer stores. Every write that has
//! to stay consistent with the engine's output (completing a recurring task,
//! editing a pattern) runs in a single transaction.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cadence::db::tasks::Tasks;
//! use cadence::libs::task::{Task, TaskFilter};
//!
//! let mut tasks = Tasks::new()?;
//! tasks.insert(&Task::new("Review code", "Check open PRs"))?;
//! let open = tasks.fetch(TaskFilter::Open)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup and database location.
pub mod db;

/// Versioned schema changes.
pub mod migrations;

/// Task records and the recurrence workflows on top of them.
pub mod tasks;
