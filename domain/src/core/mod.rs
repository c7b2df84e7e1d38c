//! Core domain concepts shared across all subdomains.
//!
//! - [`identity::Identity`] — an authenticated caller (id + display name)
//! - [`error::DomainError`] — caller-facing session and question conditions

pub mod error;
pub mod identity;
