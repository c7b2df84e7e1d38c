//! Question domain entities

use crate::core::identity::{Identity, UserId};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};

const QUESTION_ID_LEN: usize = 16;

/// Opaque identifier of a question (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(QUESTION_ID_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A question submitted during a live session (Entity)
///
/// `id` and `creator` never change after creation. `answered` only moves
/// from `false` to `true`. Mutation goes through
/// [`QuestionStore`](super::store::QuestionStore), which keeps `votes` in
/// step with the vote ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    creator: Identity,
    anonymous: bool,
    votes: u32,
    answered: bool,
}

impl Question {
    pub(crate) fn new(text: String, creator: Identity, anonymous: bool) -> Self {
        Self {
            id: QuestionId::generate(),
            text,
            creator,
            anonymous,
            votes: 0,
            answered: false,
        }
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn creator(&self) -> &Identity {
        &self.creator
    }

    pub fn creator_id(&self) -> &UserId {
        &self.creator.id
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn votes(&self) -> u32 {
        self.votes
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    /// Whether `user` submitted this question
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.creator.id == user
    }

    pub(crate) fn rewrite(&mut self, text: String, anonymous: bool) {
        self.text = text;
        self.anonymous = anonymous;
    }

    pub(crate) fn add_vote(&mut self) {
        self.votes += 1;
    }

    pub(crate) fn mark_answered(&mut self) {
        self.answered = true;
    }
}
