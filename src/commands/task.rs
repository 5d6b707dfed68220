use super::{parse_date, repeat::PatternArgs};
use crate::{
    db::tasks::Tasks,
    libs::{
        messages::Message,
        task::{Task, TaskFilter, TaskPriority},
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a task, optionally repeating
    Add {
        /// Task name
        name: String,
        /// Free-form comment
        #[arg(short, long, default_value = "")]
        comment: String,
        /// Due date (YYYY-MM-DD); repeating tasks default to today
        #[arg(short, long)]
        due: Option<String>,
        #[arg(short, long, value_enum, default_value_t = TaskPriority::Medium)]
        priority: TaskPriority,
        #[command(flatten)]
        pattern: PatternArgs,
    },
    /// List open tasks
    List {
        /// Include completed tasks
        #[arg(short, long, conflicts_with = "recurring")]
        all: bool,
        /// Only repeating tasks
        #[arg(short, long)]
        recurring: bool,
    },
    /// Delete a task
    Delete {
        /// Task id or unique id prefix
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: TaskArgs) -> Result<()> {
    match args.command {
        TaskCommand::Add {
            name,
            comment,
            due,
            priority,
            pattern,
        } => handle_add(&name, &comment, due, priority, &pattern),
        TaskCommand::List { all, recurring } => handle_list(all, recurring),
        TaskCommand::Delete { id, yes } => handle_delete(&id, yes),
    }
}

fn handle_add(name: &str, comment: &str, due: Option<String>, priority: TaskPriority, pattern: &PatternArgs) -> Result<()> {
    let pattern = pattern.to_pattern()?;
    let due_date = match due {
        Some(due) => Some(parse_date(&due)?),
        None if pattern.is_some() => Some(Local::now().date_naive()),
        None => None,
    };

    let mut task = Task::new(name, comment).with_priority(priority).with_pattern(pattern);
    task.due_date = due_date;

    Tasks::new()?.insert(&task)?;

    msg_success!(Message::TaskCreated(task.name.clone()));
    if let Some(pattern) = &task.recurring_pattern {
        msg_print!(Message::PatternSummary(pattern.to_string()));
    }
    Ok(())
}

fn handle_list(all: bool, recurring: bool) -> Result<()> {
    let (filter, header) = if all {
        (TaskFilter::All, Message::TasksHeader)
    } else if recurring {
        (TaskFilter::Recurring, Message::RecurringTasksHeader)
    } else {
        (TaskFilter::Open, Message::OpenTasksHeader)
    };

    let tasks = Tasks::new()?.fetch(filter)?;
    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    msg_print!(header, true);
    View::tasks(&tasks)?;
    Ok(())
}

fn handle_delete(id: &str, yes: bool) -> Result<()> {
    let mut tasks = Tasks::new()?;
    let task = tasks.resolve(id)?;

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.name.clone()).to_string())
            .default(false)
            .interact()?;

    if confirmed {
        tasks.delete(task.id)?;
        msg_success!(Message::TaskDeleted(task.name));
    } else {
        msg_info!(Message::OperationCancelled);
    }

    Ok(())
}
