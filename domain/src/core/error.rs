//! Domain error types

use crate::question::entities::QuestionId;
use thiserror::Error;

/// Caller-facing conditions raised by session and question operations.
///
/// All variants are expected and recoverable. Broken invariants are not
/// represented here; they panic instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No session is running")]
    SessionNotActive,

    #[error("Question not found: {0}")]
    NotFound(QuestionId),

    #[error("Question is owned by another user")]
    Forbidden,

    #[error("User already voted for this question")]
    AlreadyVoted,

    #[error("Question has already been answered")]
    AlreadyAnswered,
}

impl DomainError {
    /// HTTP status a transport binding should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::SessionNotActive
            | DomainError::AlreadyVoted
            | DomainError::AlreadyAnswered => 406,
            DomainError::NotFound(_) => 404,
            DomainError::Forbidden => 403,
        }
    }
}
