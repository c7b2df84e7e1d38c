//! Port for pushing session state to live subscribers.
//!
//! Defines the [`UpdatePublisher`] trait that the service calls after every
//! accepted mutation. Implementations fan the snapshot out to subscribers.
//!
//! `publish` is synchronous and non-fallible: delivery problems belong to the
//! publisher and must never reach the mutation caller.

use liveqa_domain::SessionSnapshot;
use std::sync::Arc;

/// Port for fanning out session snapshots.
///
/// Snapshots may arrive out of revision order when mutations race;
/// implementations must discard any snapshot older than one already
/// published.
pub trait UpdatePublisher: Send + Sync {
    /// Hand over the state produced by an accepted mutation.
    fn publish(&self, snapshot: Arc<SessionSnapshot>);
}

/// No-op implementation for tests and headless use.
pub struct NoUpdatePublisher;

impl UpdatePublisher for NoUpdatePublisher {
    fn publish(&self, _snapshot: Arc<SessionSnapshot>) {}
}
