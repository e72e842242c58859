//! Presentation layer for infraflow-mesh
//!
//! This crate contains the CLI definition and the HTTP surface that
//! exposes the orchestration facade.

pub mod cli;
pub mod http;

pub use cli::commands::Cli;
pub use http::{ApiError, router};
