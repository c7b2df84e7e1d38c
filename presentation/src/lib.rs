//! Presentation layer for live-qa
//!
//! This crate contains CLI definitions, console output formatting, and the
//! interactive session console.

pub mod cli;
pub mod config;
pub mod output;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use repl::{command::ReplCommand, session::SessionRepl};
