//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application config.

mod broadcast;
mod output;
mod session;

pub use broadcast::FileBroadcastConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use session::FileSessionConfig;

use liveqa_application::SessionConfig;
use serde::{Deserialize, Serialize};

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The value cannot be used as given and was replaced.
    Error,
    /// The value works but may not behave as expected.
    Warning,
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted key of the offending field, e.g. `broadcast.buffer_size`
    pub field: String,
    pub message: String,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Session lifecycle settings
    pub session: FileSessionConfig,
    /// Push-channel settings
    pub broadcast: FileBroadcastConfig,
    /// Console output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.broadcast.buffer_size == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                field: "broadcast.buffer_size".to_string(),
                message: "broadcast.buffer_size must be at least 1, using 1".to_string(),
            });
        } else if self.broadcast.buffer_size > 1024 {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                field: "broadcast.buffer_size".to_string(),
                message: format!(
                    "broadcast.buffer_size = {} keeps many stale updates per subscriber; \
                     only the latest state is ever rendered",
                    self.broadcast.buffer_size
                ),
            });
        }

        issues
    }

    /// Convert into the application-level session configuration.
    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_auto_start(self.session.auto_start)
            .with_subscriber_buffer(self.broadcast.buffer_size)
    }
}
