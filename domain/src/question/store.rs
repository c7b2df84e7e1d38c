//! Question store: the question set of the current session and its rules

use super::entities::{Question, QuestionId};
use super::ledger::VoteLedger;
use crate::core::error::DomainError;
use crate::core::identity::{Identity, UserId};

/// Ordered collection of questions plus the vote ledger backing them.
///
/// Questions are kept in creation order. Every method takes `&mut self` or
/// `&self`, so callers get atomicity by holding a single lock around the
/// store; no method performs I/O.
#[derive(Debug, Clone, Default)]
pub struct QuestionStore {
    questions: Vec<Question>,
    ledger: VoteLedger,
}

impl QuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a new question with zero votes. The text is kept as given.
    pub fn create(
        &mut self,
        text: &str,
        creator: Identity,
        anonymous: bool,
    ) -> Question {
        let question = Question::new(text.to_string(), creator, anonymous);
        self.questions.push(question.clone());
        question
    }

    /// Replace text and anonymity of a question owned by `requester`.
    pub fn update(
        &mut self,
        id: &QuestionId,
        requester: &UserId,
        text: &str,
        anonymous: bool,
    ) -> Result<Question, DomainError> {
        let question = self.owned_mut(id, requester)?;
        question.rewrite(text.to_string(), anonymous);
        Ok(question.clone())
    }

    /// Remove a question owned by `requester` together with its votes.
    pub fn delete(&mut self, id: &QuestionId, requester: &UserId) -> Result<Question, DomainError> {
        let index = self.position(id)?;
        if !self.questions[index].is_owned_by(requester) {
            return Err(DomainError::Forbidden);
        }
        let removed = self.questions.remove(index);
        self.ledger.clear(id);
        Ok(removed)
    }

    /// Add one vote from `voter`.
    ///
    /// Rejects answered questions and repeated votes. The ledger insert and
    /// the counter increment happen in this single call.
    pub fn upvote(&mut self, id: &QuestionId, voter: &UserId) -> Result<Question, DomainError> {
        let index = self.position(id)?;
        if self.questions[index].is_answered() {
            return Err(DomainError::AlreadyAnswered);
        }
        if !self.ledger.record_vote(id, voter) {
            return Err(DomainError::AlreadyVoted);
        }

        let question = &mut self.questions[index];
        question.add_vote();
        assert_eq!(
            question.votes() as usize,
            self.ledger.voter_count(id),
            "vote counter diverged from ledger for question {id}"
        );
        Ok(question.clone())
    }

    /// Flag a question as answered. Repeated calls are no-ops.
    pub fn mark_answered(&mut self, id: &QuestionId) -> Result<Question, DomainError> {
        let index = self.position(id)?;
        let question = &mut self.questions[index];
        question.mark_answered();
        Ok(question.clone())
    }

    /// All questions in creation order
    pub fn list(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Drop every question and vote record
    pub fn clear(&mut self) {
        self.questions.clear();
        self.ledger.clear_all();
    }

    fn position(&self, id: &QuestionId) -> Result<usize, DomainError> {
        self.questions
            .iter()
            .position(|q| q.id() == id)
            .ok_or_else(|| DomainError::NotFound(id.clone()))
    }

    fn owned_mut(
        &mut self,
        id: &QuestionId,
        requester: &UserId,
    ) -> Result<&mut Question, DomainError> {
        let index = self.position(id)?;
        let question = &mut self.questions[index];
        if !question.is_owned_by(requester) {
            return Err(DomainError::Forbidden);
        }
        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo() -> Identity {
        Identity::new("foo", "Foo Foo_Tester")
    }

    fn bar() -> Identity {
        Identity::new("bar", "Bar Bar_Tester")
    }

    #[test]
    fn test_create_starts_unvoted_and_unanswered() {
        let mut store = QuestionStore::new();
        let q = store.create("Q1", foo(), false);

        assert_eq!(q.votes(), 0);
        assert!(!q.is_answered());
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_text_stored_exactly_as_given() {
        let mut store = QuestionStore::new();
        let padded = store.create("  padded  ", foo(), false);
        assert_eq!(padded.text(), "  padded  ");

        let blank = store.create("", foo(), false);
        assert_eq!(blank.text(), "");
        assert_eq!(store.len(), 2);

        let updated = store.update(padded.id(), &foo().id, " ", true).unwrap();
        assert_eq!(updated.text(), " ");
    }

    #[test]
    fn test_list_keeps_creation_order() {
        let mut store = QuestionStore::new();
        store.create("first", foo(), false);
        store.create("second", bar(), false);
        store.create("third", foo(), true);

        let texts: Vec<_> = store.list().iter().map(|q| q.text()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_update_by_owner() {
        let mut store = QuestionStore::new();
        let q = store.create("Foo Question", foo(), false);
        store.upvote(q.id(), &bar().id).unwrap();

        let updated = store
            .update(q.id(), &foo().id, "Updated Foo Question", true)
            .unwrap();

        assert_eq!(updated.text(), "Updated Foo Question");
        assert!(updated.is_anonymous());
        assert_eq!(updated.votes(), 1);
        assert_eq!(updated.id(), q.id());
        assert_eq!(updated.creator_id(), q.creator_id());
    }

    #[test]
    fn test_update_by_non_owner_is_forbidden() {
        let mut store = QuestionStore::new();
        let q = store.create("Foo Question", foo(), false);

        let err = store.update(q.id(), &bar().id, "hijack", true).unwrap_err();

        assert_eq!(err, DomainError::Forbidden);
        assert_eq!(store.get(q.id()).unwrap().text(), "Foo Question");
    }

    #[test]
    fn test_update_unknown_id() {
        let mut store = QuestionStore::new();
        let err = store
            .update(&QuestionId::from("invalid"), &foo().id, "x", false)
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound(QuestionId::from("invalid")));
    }

    #[test]
    fn test_delete_by_owner_removes_votes() {
        let mut store = QuestionStore::new();
        let q = store.create("Foo Question", foo(), false);
        store.upvote(q.id(), &bar().id).unwrap();

        store.delete(q.id(), &foo().id).unwrap();

        assert!(store.get(q.id()).is_none());
        assert_eq!(store.ledger().voter_count(q.id()), 0);
    }

    #[test]
    fn test_delete_by_non_owner_is_forbidden() {
        let mut store = QuestionStore::new();
        let q = store.create("Foo Question", foo(), false);

        assert_eq!(
            store.delete(q.id(), &bar().id).unwrap_err(),
            DomainError::Forbidden
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_double_vote_is_rejected() {
        let mut store = QuestionStore::new();
        let q = store.create("Q1", foo(), false);

        assert_eq!(store.upvote(q.id(), &foo().id).unwrap().votes(), 1);
        assert_eq!(
            store.upvote(q.id(), &foo().id).unwrap_err(),
            DomainError::AlreadyVoted
        );
        assert_eq!(store.get(q.id()).unwrap().votes(), 1);
    }

    #[test]
    fn test_vote_on_answered_question_is_rejected() {
        let mut store = QuestionStore::new();
        let q = store.create("Q1", foo(), false);
        store.mark_answered(q.id()).unwrap();

        assert_eq!(
            store.upvote(q.id(), &bar().id).unwrap_err(),
            DomainError::AlreadyAnswered
        );
        assert_eq!(store.get(q.id()).unwrap().votes(), 0);
        assert!(!store.ledger().has_voted(q.id(), &bar().id));
    }

    #[test]
    fn test_mark_answered_is_idempotent() {
        let mut store = QuestionStore::new();
        let q = store.create("Q1", foo(), false);

        assert!(store.mark_answered(q.id()).unwrap().is_answered());
        assert!(store.mark_answered(q.id()).unwrap().is_answered());
    }

    #[test]
    fn test_upvote_unknown_id() {
        let mut store = QuestionStore::new();
        assert!(matches!(
            store.upvote(&QuestionId::from("invalid"), &foo().id),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_votes_match_ledger_after_mixed_attempts() {
        let mut store = QuestionStore::new();
        let q1 = store.create("Q1", foo(), false);
        let q2 = store.create("Q2", bar(), false);
        let voters = ["a", "b", "c", "a", "b", "d", "a"];

        for voter in voters {
            let _ = store.upvote(q1.id(), &UserId::from(voter));
            let _ = store.upvote(q2.id(), &UserId::from(voter));
        }
        store.mark_answered(q2.id()).unwrap();
        let _ = store.upvote(q2.id(), &UserId::from("e"));

        for q in store.list() {
            assert_eq!(q.votes() as usize, store.ledger().voter_count(q.id()));
        }
        assert_eq!(store.get(q1.id()).unwrap().votes(), 4);
    }
}
