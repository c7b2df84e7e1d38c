//! Live session domain.
//!
//! - [`entities::Session`] — lifecycle state machine gating question mutation
//! - [`snapshot::SessionSnapshot`] — revisioned, immutable copy handed to readers

pub mod entities;
pub mod snapshot;
