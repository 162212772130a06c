use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::Select;
use tokio::sync::mpsc::unbounded_channel;

use super::{spinner, CommandContext};
use crate::api::ApiClient;
use crate::flows::{TagForm, UiStatus};
use crate::models::{Tag, TrainingDay};
use crate::session::Session;

#[derive(Args)]
pub struct TagCreateCommand {
    /// Day to train (e.g. monday, mon, lunes). Prompts when omitted.
    #[arg(short, long)]
    day: Option<TrainingDay>,
}

impl TagCreateCommand {
    pub async fn execute(self, ctx: CommandContext) -> Result<()> {
        let session = ctx.require_session()?;
        let client = ApiClient::new(&ctx.config)?;

        let (refresh_tx, mut refresh_rx) = unbounded_channel();
        let mut form = TagForm::new(client.clone(), session.clone()).on_created(move || {
            let _ = refresh_tx.send(());
        });

        let pb = spinner("Searching your routine...");
        form.fetch_routine().await;
        pb.finish_and_clear();

        report_status(form.status())?;

        if let Some(routine) = form.routine() {
            println!("This is your routine: {}", routine.name.bold());
            println!();
        }

        let day = match self.day {
            Some(day) => day,
            None => prompt_day()?,
        };
        form.select_day(day);

        let pb = spinner(&format!("Creating tag for {}...", day));
        form.submit().await;
        pb.finish_and_clear();

        report_status(form.status())?;

        if refresh_rx.try_recv().is_ok() {
            println!();
            print_user_tags(&client, &session).await?;
        }

        Ok(())
    }
}

/// List the user's tags
pub async fn list_tags(ctx: CommandContext) -> Result<()> {
    let session = ctx.require_session()?;
    let client = ApiClient::new(&ctx.config)?;

    print_user_tags(&client, &session).await
}

async fn print_user_tags(client: &ApiClient, session: &Session) -> Result<()> {
    let pb = spinner("Loading your tags...");
    let result = client.list_user_tags(session).await;
    pb.finish_and_clear();

    match result {
        Ok(tags) => {
            print_tags(&tags);
            Ok(())
        }
        Err(e) => {
            println!("{} Failed to load tags: {}", "✗".red(), e);
            Err(e)
        }
    }
}

fn print_tags(tags: &[Tag]) {
    if tags.is_empty() {
        println!("No tags yet.");
        println!();
        println!("Use 'fittag tag create' to schedule your first training day.");
        return;
    }

    let mut sorted: Vec<&Tag> = tags.iter().collect();
    sorted.sort_by_key(|tag| tag.training_day().map(|d| d.index()).unwrap_or(usize::MAX));

    println!("Your tags");
    println!("────────────────────────────────");

    for tag in sorted {
        let day = tag.day.as_deref().unwrap_or("?");
        let routine = tag.routine.as_deref().unwrap_or("-");
        println!("  {:<10} {}", day.bold(), routine);
    }
}

/// Print a success status; an error status ends the command and is
/// reported once, by `main`
fn report_status(status: Option<&UiStatus>) -> Result<()> {
    match status {
        Some(UiStatus::Error(message)) => Err(anyhow!(message.clone())),
        Some(UiStatus::Success(message)) => {
            println!("{} {}", "✓".green(), message);
            Ok(())
        }
        None => Ok(()),
    }
}

fn prompt_day() -> Result<TrainingDay> {
    let labels: Vec<&str> = TrainingDay::ALL.iter().map(|d| d.wire_name()).collect();

    let index = Select::new()
        .with_prompt("Which day will you train?")
        .items(&labels)
        .default(0)
        .interact()?;

    TrainingDay::from_index(index).ok_or_else(|| anyhow!("Invalid day selection"))
}
