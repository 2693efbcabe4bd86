use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use deskchat::cli::args::{Cli, Commands, ConfigAction};
use deskchat::cli::commands;
use deskchat::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let runtime = &cli.runtime;
    let explicit = runtime.config.as_ref().map(PathBuf::from);
    let mut settings = Settings::load_with(None, explicit.as_deref())?;

    match &cli.command {
        Some(Commands::Interactive) => commands::handle_interactive(&settings, runtime).await?,
        Some(Commands::Send { text }) => {
            commands::handle_send(&settings, runtime, &text.join(" ")).await?
        }
        Some(Commands::Sessions) => commands::handle_sessions(&settings, runtime).await?,
        Some(Commands::History { id }) => {
            commands::handle_history(&settings, runtime, id.as_deref()).await?
        }
        Some(Commands::Health) => commands::handle_health(&settings, runtime).await?,
        Some(Commands::Theme) => commands::handle_theme_toggle(&settings, runtime).await?,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force, scope } => {
                commands::handle_config_init(*force, scope.as_deref(), runtime).await?
            }
            ConfigAction::List => commands::handle_config_list(&settings).await?,
            ConfigAction::Set { key, value } => {
                commands::handle_config_set(&mut settings, runtime, key, value).await?
            }
        },
        None => {
            if !cli.prompt.is_empty() {
                commands::handle_send(&settings, runtime, &cli.prompt.join(" ")).await?
            } else {
                commands::handle_interactive(&settings, runtime).await?
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
