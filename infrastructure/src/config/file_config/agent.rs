//! Agent roster from TOML (`[[agents]]` array)

use infraflow_domain::{AgentRegistry, AgentSpec, DomainError};
use serde::{Deserialize, Serialize};

/// One `[[agents]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAgentConfig {
    pub role: String,
    pub instruction: String,
    #[serde(default)]
    pub initiator: bool,
}

impl From<&FileAgentConfig> for AgentSpec {
    fn from(config: &FileAgentConfig) -> Self {
        AgentSpec {
            role: config.role.clone(),
            instruction: config.instruction.clone(),
            is_initiator: config.initiator,
        }
    }
}

/// Build the registry from `[[agents]]`, falling back to the built-in roster
/// when none are declared.
pub fn build_registry(agents: &[FileAgentConfig]) -> Result<AgentRegistry, DomainError> {
    if agents.is_empty() {
        return Ok(AgentRegistry::default_roster());
    }
    AgentRegistry::new(agents.iter().map(AgentSpec::from).collect())
}
