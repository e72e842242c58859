//! Agent domain
//!
//! Defines the reasoning agents ([`AgentSpec`](entities::AgentSpec)) and the
//! validated, read-only roster they are registered in
//! ([`AgentRegistry`](registry::AgentRegistry)).

pub mod entities;
pub mod registry;
