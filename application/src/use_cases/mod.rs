//! Use cases (application services)

pub mod question_session;
