//! Point-in-time copy of the session, shared with readers and subscribers

use super::entities::SessionState;
use crate::question::entities::Question;

/// Immutable session state at a given revision.
///
/// Snapshots are cheap to share behind an `Arc`; the broadcaster compares
/// revisions to keep each subscriber's stream in mutation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    revision: u64,
    state: SessionState,
    questions: Vec<Question>,
}

impl SessionSnapshot {
    pub fn new(revision: u64, state: SessionState, questions: Vec<Question>) -> Self {
        Self {
            revision,
            state,
            questions,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Whether this snapshot supersedes `other`
    pub fn is_newer_than(&self, other: &SessionSnapshot) -> bool {
        self.revision > other.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_newer_than() {
        let old = SessionSnapshot::new(1, SessionState::Running, Vec::new());
        let new = SessionSnapshot::new(2, SessionState::Running, Vec::new());
        assert!(new.is_newer_than(&old));
        assert!(!old.is_newer_than(&new));
        assert!(!old.is_newer_than(&old));
    }
}
