//! Agent definitions

use serde::{Deserialize, Serialize};

/// A reasoning agent participating in missions (Value Object)
///
/// Created once when the process is configured and shared read-only
/// across all mission runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSpec {
    /// Unique role name, also used as the speaker label in transcripts
    pub role: String,
    /// Behavioral system prompt handed to the reasoning gateway
    pub instruction: String,
    /// Whether this agent is the human-facing initiator that seeds the conversation
    #[serde(default)]
    pub is_initiator: bool,
}

impl AgentSpec {
    /// Create a responding (non-initiator) agent
    pub fn new(role: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            instruction: instruction.into(),
            is_initiator: false,
        }
    }

    /// Create the initiator agent
    pub fn initiator(role: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            is_initiator: true,
            ..Self::new(role, instruction)
        }
    }
}

impl std::fmt::Display for AgentSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.role)
    }
}
