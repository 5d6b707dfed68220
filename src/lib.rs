//! # Cadence - Recurring task scheduling
//!
//! A command-line task tracker built around a recurrence engine.
//!
//! ## Features
//!
//! - **Recurring Tasks**: Daily, weekly (optionally on chosen weekdays),
//!   monthly (optionally on a fixed day) and yearly patterns with end dates
//! - **Completion Flow**: Completing an occurrence schedules the next one
//! - **Pattern Edits**: Changing a pattern swaps out the stale occurrences
//!   and schedules a fresh batch in one transaction
//! - **Previews**: Human-readable pattern summaries and upcoming dates
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cadence::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
