//! Conversation domain
//!
//! [`Turn`](entities::Turn) and the append-only
//! [`Conversation`](entities::Conversation) transcript.

pub mod entities;
