//! Engine configuration from TOML (`[engine]` section)

use infraflow_application::EngineConfig;
use infraflow_domain::DEFAULT_TERMINATION_MARKER;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Rounds allowed after the seed turn (must be > 0)
    pub max_rounds: usize,
    /// Per-turn gateway timeout in seconds
    pub turn_timeout_secs: u64,
    /// Case-insensitive marker that ends a conversation
    pub termination_marker: String,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            max_rounds: 12,
            turn_timeout_secs: 120,
            termination_marker: DEFAULT_TERMINATION_MARKER.to_string(),
        }
    }
}

impl FileEngineConfig {
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_max_rounds(self.max_rounds)
            .with_turn_timeout(Duration::from_secs(self.turn_timeout_secs))
            .with_termination_marker(self.termination_marker.clone())
    }
}
