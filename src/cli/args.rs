use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::ProfileKind;

use super::commands;

/// Entry point for the `mcq-coach` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "mcq-coach",
    about = "Turn learning objectives into multiple-choice assessment pages",
    version,
    long_about = None
)]
pub struct Cli {
    /// Optional subcommand; without one the Coach Bot menu opens
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging, including LLM requests and responses
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Course workspace that receives the generated pages
    #[arg(long = "course-dir", global = true)]
    pub course_dir: Option<PathBuf>,

    /// Override the model used for both ideas and assessments
    #[arg(short = 'm', long = "model", global = true)]
    pub model: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the question generator once, without the menu.
    Generate(GenerateArgs),
    /// Show or update the stored configuration.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Pipeline flavour (basic or contextual)
    #[arg(long)]
    pub profile: Option<ProfileKind>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Set the API key for the configured provider
    #[arg(long)]
    pub api_key: Option<String>,

    /// Set timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Set the idea generation token budget
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Set the default pipeline profile
    #[arg(long)]
    pub profile: Option<ProfileKind>,

    /// Persist the effective configuration to the config file
    #[arg(long)]
    pub save: bool,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "mcq_coach=debug"
        } else {
            "warn"
        }
    }

    pub async fn run(self) -> Result<()> {
        commands::run(self).await
    }
}
