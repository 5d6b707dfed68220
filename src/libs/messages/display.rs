//! Display implementation for cadence application messages.
//!
//! All user-facing text is defined here, in one match over [`Message`].
//! Call sites pick a variant and let the `msg_*!` macros decide where the
//! text goes (console or tracing).
//!
//! ## Text Formatting Standards
//!
//! - **Sentence Case**: Natural capitalization for readability
//! - **Specific Details**: Task names, dates and counts are interpolated
//! - **Action Guidance**: Errors suggest the flag or command that fixes them
//!
//! ## Usage
//!
//! ```rust
//! use cadence::libs::messages::Message;
//!
//! let message = Message::TaskCreated("Water plants".to_string());
//! assert_eq!(message.to_string(), "Task 'Water plants' created");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(name) => format!("Task '{}' created", name),
            Message::TaskDeleted(name) => format!("Task '{}' deleted", name),
            Message::TaskNotFound(id) => format!("No task matches '{}'", id),
            Message::TaskIdAmbiguous(prefix, count) => format!("'{}' matches {} tasks, use a longer id", prefix, count),
            Message::TasksHeader => "Tasks:".to_string(),
            Message::OpenTasksHeader => "Open tasks:".to_string(),
            Message::RecurringTasksHeader => "Recurring tasks:".to_string(),
            Message::NoTasksFound => "No tasks found.".to_string(),
            Message::ConfirmDeleteTask(name) => format!("Delete task '{}'?", name),
            Message::TaskCompleted(name) => format!("Task '{}' completed", name),
            Message::TaskAlreadyCompleted(name) => format!("Task '{}' is already completed", name),
            Message::NextOccurrenceCreated { name, due } => format!("Next '{}' scheduled for {}", name, due),
            Message::NextOccurrenceAlreadyScheduled(due) => format!("Next occurrence on {} is already scheduled", due),
            Message::SeriesFinished(name) => format!("'{}' has no further occurrences", name),
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === RECURRENCE MESSAGES ===
            Message::PatternSummary(description) => description.clone(),
            Message::PatternUpdated { removed, generated } => {
                format!("Pattern updated: removed {} old occurrence(s), scheduled {} new", removed, generated)
            }
            Message::PatternCleared(removed) => format!("Task no longer repeats, removed {} occurrence(s)", removed),
            Message::PatternInvalid(error) => format!("Invalid repeat pattern: {}", error),
            Message::PatternFlagsWithoutRepeat => "--every, --on, --day and --until require --repeat".to_string(),
            Message::PatternFlagsWithClear => "--clear cannot be combined with pattern flags".to_string(),
            Message::TaskNotRecurring(name) => format!("Task '{}' does not repeat", name),
            Message::UpcomingOccurrencesHeader(description) => format!("Upcoming occurrences ({}):", description),
            Message::NoUpcomingOccurrences => "No upcoming occurrences.".to_string(),
            Message::InvalidDate(input) => format!("Invalid date '{}', expected YYYY-MM-DD", input),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed, defaults will be used".to_string(),
            Message::ConfigModuleRecurrence => "Recurrence settings".to_string(),
            Message::PromptPreviewCount => "Occurrences shown by 'preview'".to_string(),
            Message::PromptLookaheadCount => "Occurrences scheduled after a pattern change".to_string(),

            // === FILE SYSTEM MESSAGES ===
            Message::DataStoragePathError(error) => format!("Failed to prepare data directory: {}", error),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
        };

        write!(f, "{}", text)
    }
}
