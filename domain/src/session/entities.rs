//! Session domain entities

use super::snapshot::SessionSnapshot;
use crate::core::error::DomainError;
use crate::core::identity::{Identity, UserId};
use crate::question::entities::{Question, QuestionId};
use crate::question::store::QuestionStore;
use serde::{Deserialize, Serialize};

/// Lifecycle state of the live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    NotStarted,
    Running,
    Stopped,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "not_started",
            SessionState::Running => "running",
            SessionState::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The live question session (Entity)
///
/// Owns the lifecycle state and the question store. Every question mutation
/// is gated on [`SessionState::Running`]; every accepted mutation, including
/// start and stop, advances `revision` by one.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    store: QuestionStore,
    revision: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Start a fresh session with an empty question set.
    ///
    /// Returns `false` without touching anything when already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.store.clear();
        self.state = SessionState::Running;
        self.revision += 1;
        true
    }

    /// Stop the running session. Questions stay readable until the next start.
    pub fn stop(&mut self) -> Result<(), DomainError> {
        self.ensure_running()?;
        self.state = SessionState::Stopped;
        self.revision += 1;
        Ok(())
    }

    pub fn create(
        &mut self,
        text: &str,
        creator: Identity,
        anonymous: bool,
    ) -> Result<Question, DomainError> {
        self.ensure_running()?;
        let question = self.store.create(text, creator, anonymous);
        self.revision += 1;
        Ok(question)
    }

    pub fn update(
        &mut self,
        id: &QuestionId,
        requester: &UserId,
        text: &str,
        anonymous: bool,
    ) -> Result<Question, DomainError> {
        self.ensure_running()?;
        let question = self.store.update(id, requester, text, anonymous)?;
        self.revision += 1;
        Ok(question)
    }

    pub fn delete(&mut self, id: &QuestionId, requester: &UserId) -> Result<Question, DomainError> {
        self.ensure_running()?;
        let question = self.store.delete(id, requester)?;
        self.revision += 1;
        Ok(question)
    }

    pub fn upvote(&mut self, id: &QuestionId, voter: &UserId) -> Result<Question, DomainError> {
        self.ensure_running()?;
        let question = self.store.upvote(id, voter)?;
        self.revision += 1;
        Ok(question)
    }

    pub fn mark_answered(&mut self, id: &QuestionId) -> Result<Question, DomainError> {
        self.ensure_running()?;
        let question = self.store.mark_answered(id)?;
        self.revision += 1;
        Ok(question)
    }

    /// Current questions in creation order. Not gated on the session state.
    pub fn list(&self) -> &[Question] {
        self.store.list()
    }

    pub fn store(&self) -> &QuestionStore {
        &self.store
    }

    /// Immutable copy of the current state for readers and subscribers
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self.revision, self.state, self.store.list().to_vec())
    }

    fn ensure_running(&self) -> Result<(), DomainError> {
        if self.is_running() {
            Ok(())
        } else {
            Err(DomainError::SessionNotActive)
        }
    }
}
