use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{spinner, CommandContext};
use crate::api::ApiClient;

#[derive(Args)]
pub struct WhoamiCommand {}

impl WhoamiCommand {
    pub async fn execute(self, ctx: CommandContext) -> Result<()> {
        let Some(session) = ctx.config.session() else {
            println!("You are not logged in.");
            println!();
            println!("Use 'fittag session set' to store your session.");
            return Ok(());
        };

        let client = ApiClient::new(&ctx.config)?;

        let pb = spinner("Fetching user information...");
        let result = client.check_user_status(&session).await;
        pb.finish_and_clear();

        match result {
            Ok(status) => {
                println!("{} Authenticated as:", "✓".green());
                println!();
                println!("  User ID:    {}", session.user_id());
                println!("  Server:     {}", client.base_url());
                println!(
                    "  Onboarding: {}",
                    if status.first_login { "pending" } else { "complete" }
                );

                Ok(())
            }
            Err(e) => {
                println!("{} Failed to fetch user information: {}", "✗".red(), e);
                println!();
                println!("Your session token may have expired.");
                println!("Use 'fittag session set' to store a new one.");
                Err(e)
            }
        }
    }
}
