//! Infrastructure layer for live-qa
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the broadcast hub that pushes session updates to live
//! subscribers, and configuration file loading.

pub mod broadcast;
pub mod config;

// Re-export commonly used types
pub use broadcast::{BroadcastHub, SubscriberId, Subscription};
pub use config::{
    ConfigIssue, ConfigLoader, FileBroadcastConfig, FileConfig, FileOutputConfig,
    FileOutputFormat, FileSessionConfig, Severity,
};
