//! Reasoning gateway configuration from TOML (`[gateway]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completions endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Environment variable holding the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Base URL of the API, up to and including the version segment.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Max tokens per completion.
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: None,
            temperature: None,
        }
    }
}

impl FileGatewayConfig {
    /// Resolve the API key: the direct value wins over the environment.
    ///
    /// Blank values count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        let present = |key: &String| !key.trim().is_empty();
        self.api_key
            .clone()
            .filter(present)
            .or_else(|| std::env::var(&self.api_key_env).ok().filter(present))
    }
}
