use super::configured_engine;
use crate::{
    db::tasks::Tasks,
    libs::{config::Config, messages::Message, recurrence::describe_pattern, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Task id or unique id prefix
    id: String,

    /// Number of occurrences to show (defaults to the configured preview count)
    #[arg(short = 'n', long)]
    count: Option<usize>,
}

/// Lists upcoming occurrences of a task. Nothing is stored.
pub fn cmd(args: PreviewArgs) -> Result<()> {
    let config = Config::read()?;
    let engine = configured_engine(&config);
    let task = Tasks::new()?.resolve(&args.id)?;

    let Some(pattern) = task.recurring_pattern.as_ref().filter(|_| task.is_recurring) else {
        msg_info!(Message::TaskNotRecurring(task.name.clone()));
        return Ok(());
    };

    let count = args.count.unwrap_or(config.recurrence_or_default().preview_count);
    let occurrences = engine.future_occurrences(&task, count);

    msg_print!(Message::UpcomingOccurrencesHeader(describe_pattern(pattern)), true);
    if occurrences.is_empty() {
        msg_info!(Message::NoUpcomingOccurrences);
        return Ok(());
    }

    View::occurrences(&occurrences)?;
    Ok(())
}
