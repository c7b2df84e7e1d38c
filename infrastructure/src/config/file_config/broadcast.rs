//! Broadcast configuration from TOML (`[broadcast]` section)

use liveqa_application::DEFAULT_SUBSCRIBER_BUFFER;
use serde::{Deserialize, Serialize};

/// Raw broadcast configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBroadcastConfig {
    /// Pending updates kept per subscriber before the oldest is dropped
    pub buffer_size: usize,
}

impl Default for FileBroadcastConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_SUBSCRIBER_BUFFER,
        }
    }
}
