//! Configuration file loading for live-qa
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LIVEQA_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./live-qa.toml` or `./.live-qa.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/live-qa/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileBroadcastConfig, FileConfig, FileOutputConfig, FileOutputFormat,
    FileSessionConfig, Severity,
};
pub use loader::ConfigLoader;
