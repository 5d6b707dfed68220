use super::configured_engine;
use crate::{
    db::tasks::{NextOccurrence, Tasks},
    libs::{config::Config, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DoneArgs {
    /// Task id or unique id prefix
    id: String,
}

pub fn cmd(args: DoneArgs) -> Result<()> {
    let config = Config::read()?;
    let engine = configured_engine(&config);
    let mut tasks = Tasks::new()?;

    let task = tasks.resolve(&args.id)?;
    let completion = tasks.complete(task.id, &engine)?;

    msg_success!(Message::TaskCompleted(completion.task.name.clone()));
    match completion.next {
        NextOccurrence::NotRecurring => {}
        NextOccurrence::Scheduled(next) => msg_success!(Message::NextOccurrenceCreated {
            name: next.name.clone(),
            due: next.due_date.map(|d| d.to_string()).unwrap_or_default(),
        }),
        NextOccurrence::AlreadyScheduled(next) => {
            msg_info!(Message::NextOccurrenceAlreadyScheduled(next.due_date.map(|d| d.to_string()).unwrap_or_default()))
        }
        NextOccurrence::SeriesFinished => msg_info!(Message::SeriesFinished(completion.task.name)),
    }

    Ok(())
}
