//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted once into the immutable
//! application types at startup.

mod agent;
mod engine;
mod gateway;
mod logging;
mod server;

pub use agent::{FileAgentConfig, build_registry};
pub use engine::FileEngineConfig;
pub use gateway::FileGatewayConfig;
pub use logging::FileLoggingConfig;
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Reasoning gateway endpoint and credentials
    pub gateway: FileGatewayConfig,
    /// Conversation loop bounds
    pub engine: FileEngineConfig,
    /// HTTP listener settings
    pub server: FileServerConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
    /// Agent roster; empty means the built-in roster
    pub agents: Vec<FileAgentConfig>,
}

/// How serious a configuration issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Startup continues
    Warning,
    /// Startup must stop
    Error,
}

/// A problem found while validating [`FileConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// An invalid roster is only a warning: the process still starts and
    /// reports itself as not ready, the same as with missing credentials.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Engine bounds
        if self.engine.max_rounds == 0 {
            issues.push(ConfigIssue::error(
                "engine.max_rounds",
                "must be a positive integer",
            ));
        }
        if self.engine.turn_timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                "engine.turn_timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.engine.termination_marker.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "engine.termination_marker",
                "cannot be empty",
            ));
        }

        // 2. Roster
        if let Err(e) = build_registry(&self.agents) {
            issues.push(ConfigIssue::warning(
                "agents",
                format!("{}; the engine will stay offline", e),
            ));
        }

        // 3. Server
        if self.server.bind.parse::<SocketAddr>().is_err() {
            issues.push(ConfigIssue::error(
                "server.bind",
                format!("'{}' is not a socket address", self.server.bind),
            ));
        }

        // 4. Gateway
        if self.gateway.model.trim().is_empty() {
            issues.push(ConfigIssue::error("gateway.model", "cannot be empty"));
        }
        if self.gateway.api_key.is_some() {
            issues.push(ConfigIssue::warning(
                "gateway.api_key",
                format!(
                    "API key stored in the config file; prefer the {} environment variable",
                    self.gateway.api_key_env
                ),
            ));
        }

        issues
    }
}
