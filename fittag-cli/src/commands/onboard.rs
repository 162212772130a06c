use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CommandContext;
use crate::api::ApiClient;
use crate::flows::{OnboardingFlow, Route};
use crate::ui::{OnboardingApp, OnboardingScreen};

#[derive(Args)]
pub struct OnboardCommand {}

impl OnboardCommand {
    pub async fn execute(self, ctx: CommandContext) -> Result<()> {
        let client = ApiClient::new(&ctx.config)?;
        let flow = OnboardingFlow::new(client, ctx.config.session());
        let mut app = OnboardingApp::new(flow, &ctx.config.ui);

        // Redirects happen before the terminal is taken over
        if let Some(route) = app.start().await {
            report_route(Some(route));
            return Ok(());
        }

        let route = {
            let mut screen = OnboardingScreen::new(app)?;
            screen.run().await?
        };

        report_route(route);
        Ok(())
    }
}

fn report_route(route: Option<Route>) {
    match route {
        Some(Route::Login) => {
            println!("You are not logged in.");
            println!();
            println!("Use 'fittag session set' to store your session.");
        }
        Some(Route::Dashboard) => {
            println!("{} Onboarding complete!", "✓".green());
            println!();
            println!("Your weekly tags are ready. Use 'fittag tag list' to see them.");
        }
        None => {
            println!("Onboarding paused. Run 'fittag onboard' to continue.");
        }
    }
}
