//! Core library modules for the cadence application.
//!
//! ## Features
//!
//! - **Recurrence Engine**: Pattern arithmetic, occurrence generation and pattern edits
//! - **Task Model**: The task record shared by the engine, the store and the CLI
//! - **Core Infrastructure**: Configuration, data storage, messaging
//! - **User Interface**: Console tables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cadence::db::tasks::Tasks;
//! use cadence::libs::recurrence::{RecurrenceEngine, RecurrencePattern};
//! use cadence::libs::task::Task;
//!
//! let engine = RecurrenceEngine::new();
//! let task = Task::new("Pay rent", "").with_pattern(Some(RecurrencePattern::monthly(1).with_day_of_month(1)));
//! let mut tasks = Tasks::new()?;
//! tasks.insert(&task)?;
//! tasks.complete(task.id, &engine)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod data_storage;
pub mod messages;
pub mod recurrence;
pub mod task;
pub mod view;
