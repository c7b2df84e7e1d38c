//! Event broadcaster for live subscribers.
//!
//! - [`hub::BroadcastHub`] — subscriber registry implementing `UpdatePublisher`
//! - [`hub::Subscription`] — one push-channel registration, deregisters on drop

pub mod hub;

pub use hub::{BroadcastHub, SubscriberId, Subscription};
