//! Engine parameters: conversation loop control.
//!
//! [`EngineConfig`] groups the static parameters that bound every mission
//! run. It is built once at startup and never mutated.

use crate::ports::reasoning_gateway::ReasoningGateway;
use crate::use_cases::run_conversation::ConversationScheduler;
use infraflow_domain::{DEFAULT_TERMINATION_MARKER, DomainError, MarkerTermination};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Conversation loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of rounds after the seed turn. Must be positive.
    pub max_rounds: usize,
    /// Upper bound for a single gateway call.
    pub turn_timeout: Duration,
    /// Reserved token that ends a conversation when an agent utters it.
    pub termination_marker: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_rounds: 12,
            turn_timeout: Duration::from_secs(120),
            termination_marker: DEFAULT_TERMINATION_MARKER.to_string(),
        }
    }
}

impl EngineConfig {
    // ==================== Builder Methods ====================

    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout = timeout;
        self
    }

    pub fn with_termination_marker(mut self, marker: impl Into<String>) -> Self {
        self.termination_marker = marker.into();
        self
    }

    /// Check the bounds every mission relies on
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_rounds == 0 {
            return Err(DomainError::Configuration(
                "max_rounds must be a positive integer".to_string(),
            ));
        }
        if self.turn_timeout.is_zero() {
            return Err(DomainError::Configuration(
                "turn_timeout must be greater than zero".to_string(),
            ));
        }
        MarkerTermination::new(self.termination_marker.as_str())?;
        Ok(())
    }

    /// Build a scheduler for `gateway` bounded by these parameters
    pub fn build_scheduler(
        &self,
        gateway: Arc<dyn ReasoningGateway>,
    ) -> Result<ConversationScheduler, DomainError> {
        self.validate()?;
        let termination = MarkerTermination::new(self.termination_marker.as_str())?;
        Ok(ConversationScheduler::new(gateway)
            .with_turn_timeout(self.turn_timeout)
            .with_termination(Arc::new(termination)))
    }
}
