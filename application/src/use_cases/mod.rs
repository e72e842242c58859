//! Use cases (application services)

pub mod mission_lifecycle;
pub mod run_conversation;
