use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CommandContext;

#[derive(Args)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn execute(self, mut ctx: CommandContext) -> Result<()> {
        if !ctx.config.is_authenticated() {
            println!("You are not logged in.");
            return Ok(());
        }

        ctx.config.clear_session();
        ctx.save()?;

        println!("{} Logged out successfully!", "✓".green());

        Ok(())
    }
}
