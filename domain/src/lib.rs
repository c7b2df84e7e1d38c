//! Domain layer for live-qa
//!
//! This crate contains the session state machine, the question store with its
//! vote ledger, and the visibility rules. It performs no I/O and has no
//! dependencies on async runtimes or transports.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A single live Q&A session. Questions can only be created, edited, voted on
//! or answered while the session is running.
//!
//! ## Question & Vote Ledger
//!
//! - Each user votes at most once per question
//! - Answered questions accept no further votes
//! - Only the creator may edit or delete a question
//!
//! ## Visibility
//!
//! Anonymous questions hide their creator from everyone but the creator.

pub mod core;
pub mod question;
pub mod session;
pub mod visibility;

// Re-export commonly used types
pub use crate::core::{
    error::DomainError,
    identity::{Identity, UserId},
};
pub use question::{
    entities::{Question, QuestionId},
    ledger::VoteLedger,
    store::QuestionStore,
};
pub use session::{
    entities::{Session, SessionState},
    snapshot::SessionSnapshot,
};
pub use visibility::projector::{
    QuestionView, SessionUpdate, project, project_all, project_snapshot,
};
