use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{spinner, CommandContext};
use crate::api::ApiClient;

#[derive(Args)]
pub struct RoutineCommand {}

impl RoutineCommand {
    pub async fn execute(self, ctx: CommandContext) -> Result<()> {
        let session = ctx.require_session()?;
        let client = ApiClient::new(&ctx.config)?;

        let pb = spinner("Fetching your routine...");
        let result = client.fetch_user_routine(&session).await;
        pb.finish_and_clear();

        match result {
            Ok(Some(routine)) => {
                println!("Your routine:");
                println!();
                println!("  {}", routine.name.bold());

                if let Some(art) = routine.art() {
                    println!("  {}", art.asset_url(&ctx.config.ui.asset_base_url).dimmed());
                }

                Ok(())
            }
            Ok(None) => {
                println!("{} No routine assigned yet.", "✗".red());
                println!();
                println!("Run 'fittag onboard' to get one.");
                Ok(())
            }
            Err(e) => {
                println!("{} Failed to fetch routine: {}", "✗".red(), e);
                Err(e)
            }
        }
    }
}
