//! Vote ledger: which users already voted on which question

use super::entities::QuestionId;
use crate::core::identity::UserId;
use std::collections::{HashMap, HashSet};

/// Per-question set of voter identities.
///
/// Only [`QuestionStore`](super::store::QuestionStore) mutates the ledger, in
/// the same `&mut` call that bumps the question's vote counter, so the two
/// can never be observed out of step.
#[derive(Debug, Clone, Default)]
pub struct VoteLedger {
    voters: HashMap<QuestionId, HashSet<UserId>>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_voted(&self, question: &QuestionId, voter: &UserId) -> bool {
        self.voters
            .get(question)
            .is_some_and(|voters| voters.contains(voter))
    }

    /// Record a vote. Returns `false` if the voter was already recorded.
    pub(crate) fn record_vote(&mut self, question: &QuestionId, voter: &UserId) -> bool {
        self.voters
            .entry(question.clone())
            .or_default()
            .insert(voter.clone())
    }

    /// Number of distinct voters recorded for `question`
    pub fn voter_count(&self, question: &QuestionId) -> usize {
        self.voters.get(question).map_or(0, HashSet::len)
    }

    /// Drop all vote records of a deleted question
    pub(crate) fn clear(&mut self, question: &QuestionId) {
        self.voters.remove(question);
    }

    pub(crate) fn clear_all(&mut self) {
        self.voters.clear();
    }
}
