//! CLI entrypoint for live-qa
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use liveqa_application::QuestionSessionService;
use liveqa_infrastructure::{BroadcastHub, ConfigLoader, FileConfig, Severity};
use liveqa_presentation::{Cli, OutputConfig, ReplConfig, SessionRepl};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        for line in ConfigLoader::describe_sources() {
            println!("{}", line);
        }
        return Ok(());
    }

    // === Configuration ===
    let file_config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    for issue in file_config.validate() {
        match issue.severity {
            Severity::Error => error!("Config {}: {}", issue.field, issue.message),
            Severity::Warning => warn!("Config {}: {}", issue.field, issue.message),
        }
    }

    let mut session_config = file_config.to_session_config();
    if cli.auto_start {
        session_config = session_config.with_auto_start(true);
    }
    if let Some(size) = cli.buffer_size {
        session_config = session_config.with_subscriber_buffer(size);
    }

    let output = OutputConfig::from(&file_config.output).with_overrides(cli.output, cli.no_color);
    if !output.color {
        colored::control::set_override(false);
    }

    info!(
        "Starting live-qa (buffer {}, auto start: {})",
        session_config.subscriber_buffer, session_config.auto_start
    );

    // === Dependency Injection ===
    let hub = BroadcastHub::new(session_config.subscriber_buffer);
    let service = QuestionSessionService::new(Arc::new(hub.clone()));

    if session_config.auto_start {
        service.start_session().await;
    }

    let mut repl = SessionRepl::new(service.clone(), hub.clone())
        .with_output(output)
        .with_config(ReplConfig::default());
    repl.run().await.context("Console failed")?;

    if service.is_running().await {
        let _ = service.stop_session().await;
    }
    hub.disconnect_all();

    Ok(())
}
