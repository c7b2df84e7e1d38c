//! Visibility projection: what a given requester may see of each question.

pub mod projector;
