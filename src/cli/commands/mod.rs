//! CLI command definitions and dispatch.

mod analyze;
mod config_cmd;
mod interactive;
mod status;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "docscope")]
#[command(about = "Summaries, entities, and sentiment from a document-analysis service")]
#[command(version)]
pub struct Cli {
    /// Config file (default: docscope.toml or the user config directory)
    #[arg(long, global = true, env = "DOCSCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Analysis service endpoint (overrides config)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a file or text for analysis
    Analyze {
        #[command(subcommand)]
        command: AnalyzeCommands,
    },

    /// Analyze text line by line; a new line supersedes a pending request
    Interactive,

    /// Check that the analysis service is reachable
    Status,

    /// Toggle the output theme, or set it explicitly
    Theme {
        /// Theme to set (light or dark) instead of toggling
        #[arg(long)]
        set: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum AnalyzeCommands {
    /// Upload a file (PDF, DOCX, TXT, ...)
    File {
        /// File to upload
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Submit raw text
    Text {
        /// Text to analyze, or "-" to read from stdin
        text: String,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
}

#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also write the result as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Parse arguments, load configuration, and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    let endpoint = cli.endpoint.as_deref();

    match cli.command {
        Commands::Analyze { command } => {
            analyze::cmd_analyze(&load_config(config_path, endpoint).await?, command).await
        }
        Commands::Interactive => {
            interactive::cmd_interactive(&load_config(config_path, endpoint).await?).await
        }
        Commands::Status => status::cmd_status(&load_config(config_path, endpoint).await?).await,
        // The theme command may create the config file, so it resolves the path itself.
        Commands::Theme { set } => config_cmd::cmd_theme(config_path, set.as_deref()).await,
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                config_cmd::cmd_config_show(&load_config(config_path, endpoint).await?)
            }
        },
    }
}

async fn load_config(path: Option<&Path>, endpoint: Option<&str>) -> anyhow::Result<Config> {
    let mut config = Config::load(path)
        .await
        .context("Failed to load configuration")?;
    if let Some(endpoint) = endpoint {
        config.service = config.service.with_endpoint(endpoint);
    }
    Ok(config)
}
