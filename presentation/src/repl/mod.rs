//! Interactive console for driving a live session
//!
//! The console acts as any number of users against one in-process session,
//! which makes it possible to watch the push stream of several subscribers
//! side by side.

pub mod command;
pub mod session;
