//! HTTP server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Socket address to listen on
    pub bind: String,
    /// Name reported by the status endpoint
    pub engine_name: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:10000".to_string(),
            engine_name: "infraflow-mesh".to_string(),
        }
    }
}
