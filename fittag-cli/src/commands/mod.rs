mod config_cmd;
mod logout;
mod onboard;
mod routine;
mod session_cmd;
mod status;
mod tag;
mod whoami;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::session::Session;

pub use logout::LogoutCommand;
pub use onboard::OnboardCommand;
pub use routine::RoutineCommand;
pub use session_cmd::SessionSetCommand;
pub use status::StatusCommand;
pub use tag::TagCreateCommand;
pub use whoami::WhoamiCommand;

#[derive(Parser)]
#[command(name = "fittag")]
#[command(about = "Terminal client for routine onboarding and weekly training tags", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "FITTAG_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run first-login onboarding: assign a routine and create tags
    Onboard(OnboardCommand),

    /// Manage training tags
    #[command(subcommand)]
    Tag(TagSubcommands),

    /// Show the routine assigned to you
    Routine(RoutineCommand),

    /// Show whether onboarding is still pending
    Status(StatusCommand),

    /// Manage the stored session
    #[command(subcommand)]
    Session(SessionSubcommands),

    /// Show current session information
    Whoami(WhoamiCommand),

    /// Forget the stored session
    Logout(LogoutCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum TagSubcommands {
    /// Create a tag for one training day
    Create(TagCreateCommand),

    /// List your tags
    List,
}

#[derive(Subcommand)]
enum SessionSubcommands {
    /// Store a session token and user id
    Set(SessionSetCommand),
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Edit configuration file
    Edit,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Resolved configuration shared by all commands
pub struct CommandContext {
    pub config_path: PathBuf,
    pub config: Config,
}

impl CommandContext {
    pub fn load(path: Option<&std::path::Path>) -> Result<Self> {
        let config_path = Config::resolve_path(path)?;
        let config = Config::load_from(&config_path)?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Stored session, or an error telling the user how to add one
    pub fn require_session(&self) -> Result<Session> {
        self.config
            .session()
            .context("You are not logged in. Use 'fittag session set' to store your session.")
    }

    pub fn save(&self) -> Result<()> {
        self.config.save_to(&self.config_path)
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::info!("Verbose mode enabled");
        }

        if let Commands::Completions { shell } = self.command {
            generate_completions(shell);
            return Ok(());
        }

        let ctx = CommandContext::load(self.config.as_deref())?;
        tracing::debug!("Using config at {}", ctx.config_path.display());

        match self.command {
            Commands::Onboard(cmd) => cmd.execute(ctx).await,
            Commands::Tag(subcmd) => match subcmd {
                TagSubcommands::Create(cmd) => cmd.execute(ctx).await,
                TagSubcommands::List => tag::list_tags(ctx).await,
            },
            Commands::Routine(cmd) => cmd.execute(ctx).await,
            Commands::Status(cmd) => cmd.execute(ctx).await,
            Commands::Session(subcmd) => match subcmd {
                SessionSubcommands::Set(cmd) => cmd.execute(ctx).await,
            },
            Commands::Whoami(cmd) => cmd.execute(ctx).await,
            Commands::Logout(cmd) => cmd.execute(ctx).await,
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(ctx).await,
                ConfigSubcommands::Edit => config_cmd::edit_config(ctx).await,
                ConfigSubcommands::Init { force } => config_cmd::init_config(ctx, force).await,
            },
            Commands::Completions { .. } => Ok(()),
        }
    }
}

/// Spinner shown while waiting on the backend
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
