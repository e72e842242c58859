//! Configuration file loading for infraflow-mesh
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `INFRAFLOW_*` environment variables (nested keys split on `__`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./infraflow.toml` or `./.infraflow.toml`
//! 4. Global: `$XDG_CONFIG_HOME/infraflow/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileAgentConfig, FileConfig, FileEngineConfig, FileGatewayConfig,
    FileLoggingConfig, FileServerConfig, Severity, build_registry,
};
pub use loader::ConfigLoader;
