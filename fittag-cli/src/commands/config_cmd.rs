use anyhow::Result;
use std::process::Command;

use super::CommandContext;
use crate::config::Config;

pub async fn show_config(ctx: CommandContext) -> Result<()> {
    let mut config = ctx.config.clone();
    if !config.session.token.is_empty() {
        config.session.token = "<redacted>".to_string();
    }
    let config_str = toml::to_string_pretty(&config)?;

    println!("Current Configuration ({})", ctx.config_path.display());
    println!("────────────────────────────────");
    println!();
    println!("{}", config_str);

    Ok(())
}

pub async fn edit_config(ctx: CommandContext) -> Result<()> {
    // Ensure config file exists
    if !ctx.config_path.exists() {
        ctx.save()?;
    }

    // Open in default editor
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

    Command::new(editor).arg(&ctx.config_path).status()?;

    println!("✓ Configuration saved!");

    Ok(())
}

pub async fn init_config(ctx: CommandContext, force: bool) -> Result<()> {
    if ctx.config_path.exists() && !force {
        println!(
            "Configuration file already exists at: {}",
            ctx.config_path.display()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    Config::default().save_to(&ctx.config_path)?;

    println!("✓ Configuration initialized at: {}", ctx.config_path.display());
    println!();
    println!("You can edit it with: fittag config edit");

    Ok(())
}
