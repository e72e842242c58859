//! Mission domain
//!
//! A [`Mission`](entities::Mission) is the externally visible unit of work.
//! Its status follows a one-directional state machine enforced by the
//! entity itself.

pub mod entities;
pub mod value_objects;
