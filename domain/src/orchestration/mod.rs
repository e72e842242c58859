//! Conversation orchestration policies
//!
//! Pure decision rules used by the turn loop: who speaks next
//! ([`routing`]) and when the exchange is over ([`termination`]).

pub mod routing;
pub mod termination;
