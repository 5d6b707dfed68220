/// Every user-facing message the application prints.
///
/// Text lives in [`super::display`]; call sites only pick a variant.
#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),  // name
    TaskDeleted(String),  // name
    TaskNotFound(String), // id or prefix
    TaskIdAmbiguous(String, usize),
    TasksHeader,
    OpenTasksHeader,
    RecurringTasksHeader,
    NoTasksFound,
    ConfirmDeleteTask(String), // name
    TaskCompleted(String),     // name
    TaskAlreadyCompleted(String),
    NextOccurrenceCreated { name: String, due: String },
    NextOccurrenceAlreadyScheduled(String), // due date
    SeriesFinished(String),                 // name
    OperationCancelled,

    // === RECURRENCE MESSAGES ===
    PatternSummary(String), // description
    PatternUpdated { removed: usize, generated: usize },
    PatternCleared(usize), // removed
    PatternInvalid(String),
    PatternFlagsWithoutRepeat,
    PatternFlagsWithClear,
    TaskNotRecurring(String), // name
    UpcomingOccurrencesHeader(String),
    NoUpcomingOccurrences,
    InvalidDate(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleRecurrence,
    PromptPreviewCount,
    PromptLookaheadCount,

    // === FILE SYSTEM MESSAGES ===
    DataStoragePathError(String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseUpToDate,
}
