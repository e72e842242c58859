//! Core domain concepts shared across all subdomains.
//!
//! - [`request::MissionRequest`]: validated mission text
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod request;
