//! Question domain.
//!
//! - [`entities::Question`] — a submitted question with votes and answer flag
//! - [`store::QuestionStore`] — creation-ordered question set with ownership and voting rules
//! - [`ledger::VoteLedger`] — who voted on what

pub mod entities;
pub mod ledger;
pub mod store;
