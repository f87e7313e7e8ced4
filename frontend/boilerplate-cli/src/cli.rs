use std::path::PathBuf;

use boilerplate_core::config::DEFAULT_ENV_PREFIX;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "boilerplate", about = "Load and check environment configuration")]
pub struct Cli {
    /// Prefix scoping which environment variables are read.
    #[arg(long, default_value = DEFAULT_ENV_PREFIX)]
    pub prefix: String,

    /// Dotenv file to load instead of `./.env`.
    #[arg(long, conflicts_with = "no_dotenv")]
    pub env_file: Option<PathBuf>,

    /// Skip dotenv loading entirely.
    #[arg(long)]
    pub no_dotenv: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Command {
    /// Load the configuration and print a one-line summary.
    Check,
    /// Print the loaded configuration as JSON with secrets masked.
    Show,
    /// List every recognized environment variable.
    Vars,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
