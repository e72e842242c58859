//! Application layer for infraflow-mesh
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod facade;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::EngineConfig;
pub use facade::{OrchestrationFacade, Readiness};
pub use ports::{
    conversation_logger::{
        ConversationEvent, ConversationLogger, MissionEventKind, NoConversationLogger,
    },
    progress::{ConversationProgress, NoProgress},
    reasoning_gateway::{GatewayError, ReasoningGateway, TurnRequest},
};
pub use use_cases::mission_lifecycle::{LifecycleError, MissionLedger, MissionLifecycleManager};
pub use use_cases::run_conversation::{
    ConversationRun, ConversationScheduler, RunConversationInput, RunOutcome, SchedulerError,
};
