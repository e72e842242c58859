//! Application-level configuration.
//!
//! - [`EngineConfig`]: bounds for every conversation run (rounds, per-turn
//!   timeout, termination marker)

pub mod engine_config;

pub use engine_config::EngineConfig;
