//! Question session use case.
//!
//! [`QuestionSessionService`] is the single entry point for every session and
//! question operation. It owns the [`Session`] behind one `RwLock`, so the
//! lifecycle state, question store and vote ledger always change together.
//!
//! After an accepted mutation the service takes a snapshot while still
//! holding the write lock, releases the lock, and only then hands the
//! snapshot to the [`UpdatePublisher`]. Slow subscribers therefore never
//! delay other callers.

use crate::ports::update_publisher::{NoUpdatePublisher, UpdatePublisher};
use liveqa_domain::{
    DomainError, Identity, QuestionId, QuestionView, Session, SessionSnapshot, SessionState,
    UserId, project, project_all,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Use case for running the live question session.
pub struct QuestionSessionService {
    session: Arc<RwLock<Session>>,
    publisher: Arc<dyn UpdatePublisher>,
}

impl Clone for QuestionSessionService {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

impl Default for QuestionSessionService {
    fn default() -> Self {
        Self::new(Arc::new(NoUpdatePublisher))
    }
}

impl QuestionSessionService {
    pub fn new(publisher: Arc<dyn UpdatePublisher>) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::new())),
            publisher,
        }
    }

    // ==================== Lifecycle ====================

    /// Start a fresh session. Returns `false` if one is already running.
    pub async fn start_session(&self) -> bool {
        let snapshot = {
            let mut session = self.session.write().await;
            if !session.start() {
                debug!("Session already running, start ignored");
                return false;
            }
            Arc::new(session.snapshot())
        };
        info!("Session started (revision {})", snapshot.revision());
        self.publisher.publish(snapshot);
        true
    }

    /// Stop the running session. Subscribers receive a final update.
    pub async fn stop_session(&self) -> Result<(), DomainError> {
        self.mutate("stop", |session| session.stop()).await?;
        info!("Session stopped");
        Ok(())
    }

    pub async fn is_running(&self) -> bool {
        self.session.read().await.is_running()
    }

    pub async fn state(&self) -> SessionState {
        self.session.read().await.state()
    }

    // ==================== Questions ====================

    /// Submit a new question as `creator`.
    pub async fn ask(
        &self,
        creator: &Identity,
        text: &str,
        anonymous: bool,
    ) -> Result<QuestionView, DomainError> {
        let question = self
            .mutate("create", |session| {
                session.create(text, creator.clone(), anonymous)
            })
            .await?;
        info!(
            "Question {} created by {} (anonymous: {})",
            question.id(),
            creator.id,
            anonymous
        );
        Ok(project(&question, &creator.id))
    }

    /// Rewrite a question owned by `requester`.
    pub async fn update_question(
        &self,
        requester: &Identity,
        id: &QuestionId,
        text: &str,
        anonymous: bool,
    ) -> Result<QuestionView, DomainError> {
        let question = self
            .mutate("update", |session| {
                session.update(id, &requester.id, text, anonymous)
            })
            .await?;
        debug!("Question {} updated by {}", id, requester.id);
        Ok(project(&question, &requester.id))
    }

    /// Delete a question owned by `requester`.
    pub async fn delete_question(
        &self,
        requester: &Identity,
        id: &QuestionId,
    ) -> Result<(), DomainError> {
        self.mutate("delete", |session| session.delete(id, &requester.id))
            .await?;
        info!("Question {} deleted by {}", id, requester.id);
        Ok(())
    }

    /// Cast `voter`'s single vote on a question.
    pub async fn upvote(
        &self,
        voter: &Identity,
        id: &QuestionId,
    ) -> Result<QuestionView, DomainError> {
        let question = self
            .mutate("upvote", |session| session.upvote(id, &voter.id))
            .await?;
        debug!(
            "Vote by {} recorded on {} ({} votes)",
            voter.id,
            id,
            question.votes()
        );
        Ok(project(&question, &voter.id))
    }

    /// Mark a question as answered.
    pub async fn mark_answered(
        &self,
        requester: &Identity,
        id: &QuestionId,
    ) -> Result<QuestionView, DomainError> {
        let question = self
            .mutate("answer", |session| session.mark_answered(id))
            .await?;
        info!("Question {} marked answered by {}", id, requester.id);
        Ok(project(&question, &requester.id))
    }

    // ==================== Reads ====================

    /// Current questions as seen by `requester`, in creation order.
    pub async fn list_questions(&self, requester: &UserId) -> Vec<QuestionView> {
        let session = self.session.read().await;
        project_all(session.list(), requester)
    }

    /// Consistent copy of the whole session state.
    pub async fn snapshot(&self) -> Arc<SessionSnapshot> {
        Arc::new(self.session.read().await.snapshot())
    }

    /// Run `op` under the write lock and publish the resulting state.
    async fn mutate<T>(
        &self,
        name: &str,
        op: impl FnOnce(&mut Session) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let (value, snapshot) = {
            let mut session = self.session.write().await;
            match op(&mut *session) {
                Ok(value) => (value, Arc::new(session.snapshot())),
                Err(e) => {
                    debug!("Rejected {}: {}", name, e);
                    return Err(e);
                }
            }
        };
        self.publisher.publish(snapshot);
        Ok(value)
    }
}
