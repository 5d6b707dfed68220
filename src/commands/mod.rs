//! Command-line interface for cadence.
//!
//! Each subcommand lives in its own module exposing an `Args` struct and a
//! `cmd` function. [`Cli::menu`] parses the process arguments and dispatches.
//!
//! ## Available Commands
//!
//! - **`init`**: Interactive configuration wizard
//! - **`task`**: Add, list and delete tasks
//! - **`done`**: Complete a task and schedule its next occurrence
//! - **`repeat`**: Change or clear how a task repeats
//! - **`preview`**: Show upcoming occurrences without storing them

pub mod done;
pub mod init;
pub mod preview;
pub mod repeat;
pub mod task;

use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::recurrence::RecurrenceEngine;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage tasks", arg_required_else_help = true)]
    Task(task::TaskArgs),
    #[command(about = "Complete a task and schedule the next occurrence")]
    Done(done::DoneArgs),
    #[command(about = "Change or clear how a task repeats")]
    Repeat(repeat::RepeatArgs),
    #[command(about = "Show upcoming occurrences of a recurring task")]
    Preview(preview::PreviewArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Done(args) => done::cmd(args),
            Commands::Repeat(args) => repeat::cmd(args),
            Commands::Preview(args) => preview::cmd(args),
        }
    }
}

/// Engine with the lookahead taken from the user's configuration.
pub fn configured_engine(config: &Config) -> RecurrenceEngine {
    RecurrenceEngine::new().with_lookahead(config.recurrence_or_default().lookahead_count)
}

/// Parses a `YYYY-MM-DD` argument.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| msg_error_anyhow!(Message::InvalidDate(input.to_string())))
}
