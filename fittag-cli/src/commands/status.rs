use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{spinner, CommandContext};
use crate::api::ApiClient;

#[derive(Args)]
pub struct StatusCommand {}

impl StatusCommand {
    pub async fn execute(self, ctx: CommandContext) -> Result<()> {
        let session = ctx.require_session()?;
        let client = ApiClient::new(&ctx.config)?;

        let pb = spinner("Checking account status...");
        let result = client.check_user_status(&session).await;
        pb.finish_and_clear();

        let status = match result {
            Ok(status) => status,
            Err(e) => {
                println!("{} Failed to check status: {}", "✗".red(), e);
                return Err(e);
            }
        };

        if status.first_login {
            println!("{} Onboarding pending", "•".yellow());
            println!();
            println!("Run 'fittag onboard' to assign your routine and create tags.");
        } else {
            println!("{} Onboarding complete", "✓".green());
        }

        Ok(())
    }
}
