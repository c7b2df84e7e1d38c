//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for session data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human readable listing
    #[default]
    Pretty,
    /// One JSON document per response or update
    Json,
}

/// CLI arguments for live-qa
#[derive(Parser, Debug)]
#[command(name = "live-qa")]
#[command(author, version, about = "Live Q&A session with real-time voting")]
#[command(long_about = r#"
live-qa hosts a single live question-and-answer session.

Participants submit questions (optionally anonymous), vote each question up
once, and the host marks questions answered. Every change is pushed to all
open subscriptions as soon as it is accepted.

Configuration files are loaded from (in priority order):
1. LIVEQA_* environment variables
2. --config <path>     Explicit config file
3. ./live-qa.toml      Project-level config
4. ~/.config/live-qa/config.toml   Global config

Example:
  live-qa --auto-start
  live-qa --buffer-size 16 -vv
"#)]
pub struct Cli {
    /// Start the session immediately after boot
    #[arg(long)]
    pub auto_start: bool,

    /// Pending updates kept per subscriber before the oldest is dropped
    #[arg(long, value_name = "N")]
    pub buffer_size: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
