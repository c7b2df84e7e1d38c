//! Requester-specific view of questions
//!
//! The same projection feeds list reads and broadcast payloads, so a
//! requester never sees one question state rendered two ways.

use crate::core::identity::UserId;
use crate::question::entities::{Question, QuestionId};
use crate::session::entities::SessionState;
use crate::session::snapshot::SessionSnapshot;
use serde::{Deserialize, Serialize};

/// Externally visible representation of a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: QuestionId,
    pub text: String,
    pub votes: u32,
    pub answered: bool,
    /// The requester created this question
    pub owned: bool,
    pub anonymous: bool,
    /// Creator's display name, empty for anonymous questions of other users
    pub creator_display: String,
}

/// One push payload: a full question list projected for one subscriber
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub revision: u64,
    pub state: SessionState,
    pub questions: Vec<QuestionView>,
}

/// Project a single question for `requester`.
pub fn project(question: &Question, requester: &UserId) -> QuestionView {
    let owned = question.is_owned_by(requester);
    let creator_display = if owned || !question.is_anonymous() {
        question.creator().display_name.clone()
    } else {
        String::new()
    };

    QuestionView {
        id: question.id().clone(),
        text: question.text().to_string(),
        votes: question.votes(),
        answered: question.is_answered(),
        owned,
        anonymous: question.is_anonymous(),
        creator_display,
    }
}

/// Project a question list, keeping its order.
pub fn project_all(questions: &[Question], requester: &UserId) -> Vec<QuestionView> {
    questions.iter().map(|q| project(q, requester)).collect()
}

/// Project a whole snapshot into a push payload for `requester`.
pub fn project_snapshot(snapshot: &SessionSnapshot, requester: &UserId) -> SessionUpdate {
    SessionUpdate {
        revision: snapshot.revision(),
        state: snapshot.state(),
        questions: project_all(snapshot.questions(), requester),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::Identity;
    use crate::question::store::QuestionStore;

    fn store_with_questions() -> QuestionStore {
        let foo = Identity::new("foo", "Foo Foo_Tester");
        let bar = Identity::new("bar", "Bar Bar_Tester");
        let mut store = QuestionStore::new();
        store.create("Foo Question1", foo.clone(), false);
        store.create("Foo Question2 anonymous", foo, true);
        store.create("Bar Question1", bar.clone(), false);
        store.create("Bar Question2 anonymous", bar, true);
        store
    }

    fn find<'a>(views: &'a [QuestionView], text: &str) -> &'a QuestionView {
        views.iter().find(|v| v.text == text).unwrap()
    }

    #[test]
    fn test_creator_shown_only_for_owned_or_public_questions() {
        let store = store_with_questions();
        let views = project_all(store.list(), &UserId::from("foo"));

        let foo_q1 = find(&views, "Foo Question1");
        assert!(foo_q1.owned);
        assert!(!foo_q1.anonymous);
        assert_eq!(foo_q1.creator_display, "Foo Foo_Tester");

        let foo_q2 = find(&views, "Foo Question2 anonymous");
        assert!(foo_q2.owned);
        assert!(foo_q2.anonymous);
        assert_eq!(foo_q2.creator_display, "Foo Foo_Tester");

        let bar_q1 = find(&views, "Bar Question1");
        assert!(!bar_q1.owned);
        assert!(!bar_q1.anonymous);
        assert_eq!(bar_q1.creator_display, "Bar Bar_Tester");

        let bar_q2 = find(&views, "Bar Question2 anonymous");
        assert!(!bar_q2.owned);
        assert!(bar_q2.anonymous);
        assert_eq!(bar_q2.creator_display, "");
    }

    #[test]
    fn test_projection_keeps_counters() {
        let mut store = QuestionStore::new();
        let q = store.create("Q1", Identity::new("foo", "Foo"), false);
        store.upvote(q.id(), &UserId::from("bar")).unwrap();
        store.mark_answered(q.id()).unwrap();

        let view = project(store.get(q.id()).unwrap(), &UserId::from("bar"));
        assert_eq!(view.votes, 1);
        assert!(view.answered);
        assert_eq!(&view.id, q.id());
    }

    #[test]
    fn test_snapshot_projection_matches_list_projection() {
        let store = store_with_questions();
        let snapshot = SessionSnapshot::new(7, SessionState::Running, store.list().to_vec());
        let bar = UserId::from("bar");

        let update = project_snapshot(&snapshot, &bar);

        assert_eq!(update.revision, 7);
        assert_eq!(update.state, SessionState::Running);
        assert_eq!(update.questions, project_all(store.list(), &bar));
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let store = store_with_questions();
        let view = project(&store.list()[3], &UserId::from("foo"));
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["creatorDisplay"], "");
        assert_eq!(json["anonymous"], true);
        assert_eq!(json["owned"], false);
    }
}
