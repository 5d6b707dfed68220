//! Terminal tables for tasks and occurrences.

use super::task::Task;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "DUE", "STATUS", "PRIORITY", "REPEATS"]);
        for task in tasks {
            table.add_row(row![
                task.short_id(),
                task.name,
                format_due(task),
                task.status,
                task.priority,
                task.recurring_pattern.as_ref().map(|p| p.to_string()).unwrap_or_default()
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Upcoming occurrences of a single series, numbered from 1.
    pub fn occurrences(occurrences: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "DUE", "WEEKDAY"]);
        for (index, occurrence) in occurrences.iter().enumerate() {
            let weekday = occurrence.due_date.map(|d| d.format("%a").to_string()).unwrap_or_default();
            table.add_row(row![index + 1, format_due(occurrence), weekday]);
        }
        table.printstd();

        Ok(())
    }
}

fn format_due(task: &Task) -> String {
    task.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string())
}
