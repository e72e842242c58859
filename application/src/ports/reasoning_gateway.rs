//! Reasoning gateway port
//!
//! Defines the interface for asking an external reasoning service for the
//! next utterance of an agent.

use async_trait::async_trait;
use infraflow_domain::Conversation;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Empty completion")]
    EmptyCompletion,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Everything the gateway needs to produce one turn
#[derive(Debug, Clone, Copy)]
pub struct TurnRequest<'a> {
    /// Role of the agent about to speak
    pub role: &'a str,
    /// That agent's system instruction
    pub instruction: &'a str,
    /// Full transcript so far, seed turn included
    pub transcript: &'a Conversation,
}

/// Gateway to the reasoning service
///
/// This port defines how the application layer obtains completions.
/// Implementations (adapters) live in the infrastructure layer.
/// One call produces exactly one utterance; callers never retry.
#[async_trait]
pub trait ReasoningGateway: Send + Sync {
    /// Identifier of the backing model, for logs and status output
    fn model(&self) -> &str;

    /// Produce the next utterance for `request.role`
    async fn complete(&self, request: TurnRequest<'_>) -> Result<String, GatewayError>;
}
