//! Infrastructure layer for infraflow-mesh
//!
//! Adapters for the ports defined in the application layer: the
//! OpenAI-compatible reasoning gateway, the JSONL conversation logger,
//! and configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

pub use config::{
    ConfigIssue, ConfigLoader, FileAgentConfig, FileConfig, FileEngineConfig, FileGatewayConfig,
    FileLoggingConfig, FileServerConfig, Severity, build_registry,
};
pub use logging::JsonlConversationLogger;
pub use providers::OpenAiReasoningGateway;
