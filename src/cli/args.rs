use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "deskchat", version, about = "Terminal chat client for the desk agent backend", propagate_version = true)]
pub struct Cli {
    /// One-shot message to send
    pub prompt: Vec<String>,

    #[command(flatten)]
    pub runtime: RuntimeArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
pub struct RuntimeArgs {
    /// Backend API root (overrides DESKCHAT_BASE_URL and the config file)
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Session to start in
    #[arg(short = 's', long = "session", global = true)]
    pub session: Option<String>,

    /// Explicit config file path
    #[arg(long = "config", global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat
    Interactive,

    /// Send one message and print the reply
    Send { text: Vec<String> },

    /// List known sessions
    Sessions,

    /// Print the history of a session (defaults to --session)
    History { id: Option<String> },

    /// Check that the backend is up
    Health,

    /// Toggle between light and dark theme
    Theme,

    /// Config management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize default config file (~/.deskchat/config.toml)
    Init {
        /// Overwrite if exists
        #[arg(long)]
        force: bool,
        /// Scope to create config: user or project (default: user)
        #[arg(long, value_parser = ["user", "project"])]
        scope: Option<String>,
    },
    Set { key: String, value: String },
    List,
}
