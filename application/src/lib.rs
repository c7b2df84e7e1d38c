//! Application layer for live-qa
//!
//! This crate contains the session use case, the publisher port and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_SUBSCRIBER_BUFFER, SessionConfig};
pub use ports::update_publisher::{NoUpdatePublisher, UpdatePublisher};
pub use use_cases::question_session::QuestionSessionService;
