use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Password};

use super::CommandContext;
use crate::session::Session;

#[derive(Args)]
pub struct SessionSetCommand {
    /// Access token issued by the FitTag login
    #[arg(long, env = "FITTAG_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Your user id
    #[arg(long)]
    user_id: Option<String>,
}

impl SessionSetCommand {
    pub async fn execute(self, mut ctx: CommandContext) -> Result<()> {
        let user_id = match self.user_id {
            Some(user_id) => user_id,
            None => Input::<String>::new().with_prompt("User id").interact_text()?,
        };

        let token = match self.token {
            Some(token) => token,
            None => Password::new().with_prompt("Token").interact()?,
        };

        let Some(session) = Session::new(token, user_id) else {
            bail!("Both token and user id are required");
        };

        ctx.config
            .set_session(session.token().to_string(), session.user_id().to_string());
        ctx.save()?;

        tracing::info!("Stored session for user {}", session.user_id());
        println!("{} Session saved for user {}", "✓".green(), session.user_id());
        println!();
        println!("Run 'fittag onboard' to get started.");

        Ok(())
    }
}
