//! Broadcast hub — fans session snapshots out to live subscribers.
//!
//! All subscriptions share one `tokio::sync::broadcast` channel of session
//! snapshots. On every published snapshot the hub:
//!
//! 1. **Discards** it if a newer revision was already published (concurrent
//!    mutations may publish out of order).
//! 2. **Sends** it on the channel without waiting. A subscriber that falls
//!    more than `buffer` snapshots behind skips the oldest ones.
//! 3. **Disconnects** every subscriber when the snapshot reports the session
//!    as no longer running, by swapping in a fresh channel. Receivers of the
//!    old one drain what was sent and then end.
//!
//! Each [`Subscription`] projects snapshots for its own identity as it
//! receives them, so anonymous questions are redacted exactly as in list
//! reads. A subscription deregisters itself on [`Drop`], which is how
//! transport closure propagates back to the hub.

use liveqa_application::UpdatePublisher;
use liveqa_domain::{
    Identity, SessionSnapshot, SessionState, SessionUpdate, UserId, project_snapshot,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, info};

/// Registry key of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

struct Registry {
    sender: broadcast::Sender<Arc<SessionSnapshot>>,
    subscribers: HashMap<SubscriberId, UserId>,
    latest: Option<Arc<SessionSnapshot>>,
}

struct HubInner {
    buffer: usize,
    next_id: AtomicU64,
    /// Uses `std::sync::RwLock` so that [`Subscription::drop`] can
    /// deregister synchronously. Sending happens under the write lock, which
    /// keeps the channel in revision order.
    registry: RwLock<Registry>,
}

impl HubInner {
    fn deregister(&self, id: SubscriberId) {
        let mut registry = self.registry.write().unwrap_or_else(|e| e.into_inner());
        if let Some(user) = registry.subscribers.remove(&id) {
            debug!("Hub: deregistered subscriber {} ({})", id, user);
        }
    }

    fn is_registered(&self, id: SubscriberId) -> bool {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .subscribers
            .contains_key(&id)
    }

    /// Drop the current sender so every receiver ends after draining.
    fn close_all(&self, registry: &mut Registry) {
        let (sender, _) = broadcast::channel(self.buffer);
        registry.sender = sender;

        let count = registry.subscribers.len();
        registry.subscribers.clear();
        if count > 0 {
            info!("Hub: disconnected {} subscriber(s)", count);
        }
    }
}

/// Event broadcaster for the live session.
///
/// Cloning is cheap and yields a handle to the same registry.
#[derive(Clone)]
pub struct BroadcastHub {
    inner: Arc<HubInner>,
}

impl BroadcastHub {
    /// Create a hub whose subscribers each lag at most `buffer` snapshots.
    pub fn new(buffer: usize) -> Self {
        let buffer = buffer.max(1);
        let (sender, _) = broadcast::channel(buffer);
        Self {
            inner: Arc::new(HubInner {
                buffer,
                next_id: AtomicU64::new(1),
                registry: RwLock::new(Registry {
                    sender,
                    subscribers: HashMap::new(),
                    latest: None,
                }),
            }),
        }
    }

    /// Register a new subscriber for `identity`.
    ///
    /// The subscription is seeded with the latest published snapshot, if any.
    pub fn subscribe(&self, identity: &Identity) -> Subscription {
        let id = SubscriberId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));

        let (receiver, seed) = {
            let mut registry = self
                .inner
                .registry
                .write()
                .unwrap_or_else(|e| e.into_inner());
            registry.subscribers.insert(id, identity.id.clone());
            (registry.sender.subscribe(), registry.latest.clone())
        };

        debug!("Hub: registered subscriber {} ({})", id, identity.id);
        Subscription {
            id,
            user: identity.id.clone(),
            receiver,
            seed,
            last_revision: None,
            dropped: 0,
            hub: self.inner.clone(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .subscribers
            .len()
    }

    /// Revision of the most recently published snapshot
    pub fn latest_revision(&self) -> Option<u64> {
        self.inner
            .registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .latest
            .as_ref()
            .map(|s| s.revision())
    }

    /// Close and forget every subscription. Sent snapshots stay receivable.
    pub fn disconnect_all(&self) {
        let mut registry = self
            .inner
            .registry
            .write()
            .unwrap_or_else(|e| e.into_inner());
        self.inner.close_all(&mut registry);
    }
}

impl UpdatePublisher for BroadcastHub {
    fn publish(&self, snapshot: Arc<SessionSnapshot>) {
        let mut registry = self
            .inner
            .registry
            .write()
            .unwrap_or_else(|e| e.into_inner());

        if let Some(latest) = &registry.latest
            && !snapshot.is_newer_than(latest)
        {
            debug!(
                "Hub: skipping revision {} (already at {})",
                snapshot.revision(),
                latest.revision()
            );
            return;
        }

        if registry.sender.send(snapshot.clone()).is_err() {
            debug!("Hub: revision {} has no receivers", snapshot.revision());
        }

        let ended = snapshot.state() != SessionState::Running;
        registry.latest = Some(snapshot);
        if ended {
            self.inner.close_all(&mut registry);
        }
    }
}

/// One live push-channel registration.
///
/// Dropping the subscription deregisters it from the hub.
pub struct Subscription {
    id: SubscriberId,
    user: UserId,
    receiver: broadcast::Receiver<Arc<SessionSnapshot>>,
    seed: Option<Arc<SessionSnapshot>>,
    last_revision: Option<u64>,
    dropped: u64,
    hub: Arc<HubInner>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next update, or `None` once the hub closed this
    /// subscription and everything sent before has been received.
    pub async fn recv(&mut self) -> Option<SessionUpdate> {
        if let Some(update) = self.take_seed() {
            return Some(update);
        }
        loop {
            match self.receiver.recv().await {
                Ok(snapshot) => {
                    if let Some(update) = self.accept(&snapshot) {
                        return Some(update);
                    }
                }
                Err(RecvError::Lagged(skipped)) => self.record_lag(skipped),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    pub fn try_recv(&mut self) -> Option<SessionUpdate> {
        if let Some(update) = self.take_seed() {
            return Some(update);
        }
        loop {
            match self.receiver.try_recv() {
                Ok(snapshot) => {
                    if let Some(update) = self.accept(&snapshot) {
                        return Some(update);
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => self.record_lag(skipped),
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Updates skipped because this subscriber fell behind
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn is_closed(&self) -> bool {
        !self.hub.is_registered(self.id)
    }

    fn take_seed(&mut self) -> Option<SessionUpdate> {
        let seed = self.seed.take()?;
        self.accept(&seed)
    }

    /// Project `snapshot` for this subscriber unless it is not newer than
    /// the last update handed out.
    fn accept(&mut self, snapshot: &SessionSnapshot) -> Option<SessionUpdate> {
        if self
            .last_revision
            .is_some_and(|last| snapshot.revision() <= last)
        {
            return None;
        }
        self.last_revision = Some(snapshot.revision());
        Some(project_snapshot(snapshot, &self.user))
    }

    fn record_lag(&mut self, skipped: u64) {
        self.dropped += skipped;
        debug!("Hub: subscriber {} lagging, skipped {} update(s)", self.id, skipped);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.deregister(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liveqa_application::QuestionSessionService;
    use liveqa_domain::{Question, QuestionStore};
    use std::time::Duration;

    fn foo() -> Identity {
        Identity::new("foo", "Foo Foo_Tester")
    }

    fn bar() -> Identity {
        Identity::new("bar", "Bar Bar_Tester")
    }

    fn baz() -> Identity {
        Identity::new("baz", "Baz Baz_Tester")
    }

    fn snapshot(
        revision: u64,
        state: SessionState,
        questions: Vec<Question>,
    ) -> Arc<SessionSnapshot> {
        Arc::new(SessionSnapshot::new(revision, state, questions))
    }

    async fn recv_timeout(sub: &mut Subscription) -> Option<SessionUpdate> {
        tokio::time::timeout(Duration::from_secs(1), sub.recv())
            .await
            .unwrap()
    }

    /// Drain everything currently queued and return the last update.
    fn drain_latest(sub: &mut Subscription) -> Option<SessionUpdate> {
        let mut last: Option<SessionUpdate> = None;
        while let Some(update) = sub.try_recv() {
            if let Some(prev) = &last {
                assert!(update.revision > prev.revision);
            }
            last = Some(update);
        }
        last
    }

    #[tokio::test]
    async fn test_two_subscribers_see_third_party_vote() {
        let hub = BroadcastHub::new(8);
        let service = QuestionSessionService::new(Arc::new(hub.clone()));
        service.start_session().await;
        let q = service.ask(&foo(), "Q1", false).await.unwrap();

        let mut sub_foo = hub.subscribe(&foo());
        let mut sub_bar = hub.subscribe(&bar());
        assert_eq!(hub.subscriber_count(), 2);

        service.upvote(&baz(), &q.id).await.unwrap();

        for sub in [&mut sub_foo, &mut sub_bar] {
            let seeded = recv_timeout(sub).await.unwrap();
            assert_eq!(seeded.questions[0].votes, 0);
            let after_vote = recv_timeout(sub).await.unwrap();
            assert!(after_vote.revision > seeded.revision);
            assert_eq!(after_vote.questions[0].votes, 1);
        }
    }

    #[tokio::test]
    async fn test_updates_projected_per_subscriber() {
        let hub = BroadcastHub::new(8);
        let service = QuestionSessionService::new(Arc::new(hub.clone()));
        service.start_session().await;

        let mut sub_foo = hub.subscribe(&foo());
        let mut sub_bar = hub.subscribe(&bar());
        service.ask(&foo(), "Q1", true).await.unwrap();

        let for_foo = drain_latest(&mut sub_foo).unwrap();
        let for_bar = drain_latest(&mut sub_bar).unwrap();

        assert!(for_foo.questions[0].owned);
        assert_eq!(for_foo.questions[0].creator_display, "Foo Foo_Tester");
        assert!(!for_bar.questions[0].owned);
        assert_eq!(for_bar.questions[0].creator_display, "");
        assert_eq!(for_bar.questions, service.list_questions(&bar().id).await);
    }

    #[test]
    fn test_stale_snapshot_not_delivered() {
        let hub = BroadcastHub::new(8);
        let mut sub = hub.subscribe(&foo());

        hub.publish(snapshot(3, SessionState::Running, Vec::new()));
        hub.publish(snapshot(2, SessionState::Running, Vec::new()));

        assert_eq!(sub.try_recv().unwrap().revision, 3);
        assert!(sub.try_recv().is_none());
        assert_eq!(hub.latest_revision(), Some(3));
    }

    #[test]
    fn test_slow_subscriber_keeps_latest() {
        let hub = BroadcastHub::new(2);
        let mut slow = hub.subscribe(&foo());
        let mut fast = hub.subscribe(&bar());

        for revision in 1..=5 {
            hub.publish(snapshot(revision, SessionState::Running, Vec::new()));
            assert_eq!(fast.try_recv().unwrap().revision, revision);
        }

        assert_eq!(slow.try_recv().unwrap().revision, 4);
        assert_eq!(slow.try_recv().unwrap().revision, 5);
        assert!(slow.try_recv().is_none());
        assert_eq!(slow.dropped(), 3);
        assert_eq!(fast.dropped(), 0);
    }

    #[tokio::test]
    async fn test_lagging_receiver_resumes_with_newest() {
        let hub = BroadcastHub::new(1);
        let mut sub = hub.subscribe(&foo());

        for revision in 1..=4 {
            hub.publish(snapshot(revision, SessionState::Running, Vec::new()));
        }

        assert_eq!(recv_timeout(&mut sub).await.unwrap().revision, 4);
        assert_eq!(sub.dropped(), 3);
    }

    #[test]
    fn test_seed_not_repeated_by_channel() {
        let hub = BroadcastHub::new(8);
        hub.publish(snapshot(1, SessionState::Running, Vec::new()));
        let mut sub = hub.subscribe(&foo());
        hub.publish(snapshot(2, SessionState::Running, Vec::new()));

        assert_eq!(sub.try_recv().unwrap().revision, 1);
        assert_eq!(sub.try_recv().unwrap().revision, 2);
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn test_new_subscriber_seeded_with_latest() {
        let hub = BroadcastHub::new(8);
        let mut store = QuestionStore::new();
        store.create("Q1", foo(), true);
        hub.publish(snapshot(4, SessionState::Running, store.list().to_vec()));

        let mut sub = hub.subscribe(&bar());
        let seeded = sub.try_recv().unwrap();

        assert_eq!(seeded.revision, 4);
        assert_eq!(seeded.questions.len(), 1);
        assert_eq!(seeded.questions[0].creator_display, "");
    }

    #[test]
    fn test_drop_deregisters() {
        let hub = BroadcastHub::new(8);
        let sub = hub.subscribe(&foo());
        let _other = hub.subscribe(&bar());
        assert_eq!(hub.subscriber_count(), 2);

        drop(sub);

        assert_eq!(hub.subscriber_count(), 1);
        hub.publish(snapshot(1, SessionState::Running, Vec::new()));
    }

    #[tokio::test]
    async fn test_stop_delivers_final_update_then_closes() {
        let hub = BroadcastHub::new(8);
        let service = QuestionSessionService::new(Arc::new(hub.clone()));
        service.start_session().await;
        let mut sub = hub.subscribe(&foo());

        service.stop_session().await.unwrap();

        assert_eq!(hub.subscriber_count(), 0);
        let last = drain_latest(&mut sub).unwrap();
        assert_eq!(last.state, SessionState::Stopped);
        assert!(recv_timeout(&mut sub).await.is_none());
        assert!(sub.is_closed());
    }

    #[tokio::test]
    async fn test_stop_start_cycle_does_not_leak_subscribers() {
        let hub = BroadcastHub::new(8);
        let service = QuestionSessionService::new(Arc::new(hub.clone()));

        for _ in 0..3 {
            service.start_session().await;
            let _a = hub.subscribe(&foo());
            let _b = hub.subscribe(&bar());
            service.stop_session().await.unwrap();
            assert_eq!(hub.subscriber_count(), 0);
        }

        let mut fresh = hub.subscribe(&foo());
        assert_eq!(hub.subscriber_count(), 1);
        assert_eq!(fresh.try_recv().unwrap().state, SessionState::Stopped);
    }

    #[test]
    fn test_disconnect_all() {
        let hub = BroadcastHub::new(8);
        let a = hub.subscribe(&foo());
        let b = hub.subscribe(&bar());

        hub.disconnect_all();

        assert_eq!(hub.subscriber_count(), 0);
        assert!(a.is_closed());
        assert!(b.is_closed());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_mutations_arrive_in_order() {
        let hub = BroadcastHub::new(4);
        let service = QuestionSessionService::new(Arc::new(hub.clone()));
        service.start_session().await;
        let q = service.ask(&foo(), "Q1", false).await.unwrap();
        let mut sub = hub.subscribe(&bar());

        let consumer = tokio::spawn(async move {
            let mut revisions = Vec::new();
            let mut last_votes = 0;
            while let Some(update) = sub.recv().await {
                revisions.push(update.revision);
                if let Some(question) = update.questions.first() {
                    last_votes = question.votes;
                }
                if update.state == SessionState::Stopped {
                    break;
                }
            }
            (revisions, last_votes)
        });

        let mut handles = Vec::new();
        for i in 0..40 {
            let service = service.clone();
            let id = q.id.clone();
            handles.push(tokio::spawn(async move {
                let voter = Identity::from_id(format!("voter-{i}"));
                service.upvote(&voter, &id).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        service.stop_session().await.unwrap();

        let (revisions, last_votes) = consumer.await.unwrap();
        assert!(revisions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(last_votes, 40);
    }
}
