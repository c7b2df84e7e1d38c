//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior.

use crate::cli::commands::OutputFormat;
use liveqa_infrastructure::{FileOutputConfig, FileOutputFormat};
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
            color: true,
        }
    }
}

impl From<&FileOutputConfig> for OutputConfig {
    fn from(file: &FileOutputConfig) -> Self {
        Self {
            format: match file.format {
                FileOutputFormat::Pretty => OutputFormat::Pretty,
                FileOutputFormat::Json => OutputFormat::Json,
            },
            color: file.color,
        }
    }
}

impl OutputConfig {
    /// Apply command line overrides on top of file values.
    pub fn with_overrides(mut self, format: Option<OutputFormat>, no_color: bool) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        if no_color {
            self.color = false;
        }
        self
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Default)]
pub struct ReplConfig {
    /// Path to history file; `None` uses the platform data directory
    pub history_file: Option<PathBuf>,
}

impl ReplConfig {
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("live-qa").join("history.txt")))
    }
}
