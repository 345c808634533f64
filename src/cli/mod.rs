//! CLI module for clusterview
//!
//! Command-line interface definitions and handlers for the cluster
//! dashboard.
//!
//! # Commands
//!
//! - `serve` - Start the dashboard API server
//! - `status` - One-shot cluster status poll
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! clusterview serve
//!
//! # Print the cluster status table once
//! clusterview status
//!
//! # Generate shell completions
//! clusterview completions bash > ~/.bash_completion.d/clusterview
//! ```

pub mod config;
pub mod output;
pub mod serve;
pub mod status;

mod completions;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Clusterview - MySQL cluster dashboard
#[derive(Parser, Debug)]
#[command(
    name = "clusterview",
    version,
    about = "Operational dashboard for a ProxySQL-fronted MySQL cluster"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the dashboard API server
    Serve(ServeArgs),
    /// Poll the cluster once and print its status
    Status(StatusArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "clusterview.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "CLUSTERVIEW_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "CLUSTERVIEW_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CLUSTERVIEW_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "clusterview.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "clusterview.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
