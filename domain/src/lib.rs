//! Domain layer for infraflow-mesh
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Mission
//!
//! A mission is a natural-language request handed to a team of reasoning
//! agents. It is tracked through a one-directional lifecycle:
//! `Pending -> Running -> Completed | Failed | Aborted | Cancelled`.
//!
//! ## Conversation
//!
//! Agents talk in turns. The initiator seeds the conversation with the
//! mission text, then a [`RoutingPolicy`] picks each following speaker until
//! a [`TerminationPredicate`] fires or the round budget is spent.

pub mod agent;
pub mod conversation;
pub mod core;
pub mod mission;
pub mod orchestration;
pub mod util;

// Re-export commonly used types
pub use agent::{
    entities::AgentSpec,
    registry::{AgentRegistry, find_initiator},
};
pub use conversation::entities::{Conversation, Turn};
pub use crate::core::{error::DomainError, request::MissionRequest};
pub use mission::{
    entities::Mission,
    value_objects::{CompletionReason, MissionId, MissionStatus},
};
pub use orchestration::{
    routing::{RoundRobin, RoutingPolicy},
    termination::{DEFAULT_TERMINATION_MARKER, MarkerTermination, TerminationPredicate},
};
