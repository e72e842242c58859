//! OpenAI-compatible reasoning gateway
//!
//! Works against any `/chat/completions` endpoint (OpenAI, Azure OpenAI,
//! vLLM, LM Studio, ...). One `complete` call is one HTTP request.

use super::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::config::FileGatewayConfig;
use async_trait::async_trait;
use infraflow_application::ports::reasoning_gateway::{
    GatewayError, ReasoningGateway, TurnRequest,
};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

pub struct OpenAiReasoningGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl OpenAiReasoningGateway {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Try to build the gateway from configuration.
    ///
    /// Returns `None` when no API key can be resolved; the engine then
    /// stays not-ready for the lifetime of the process.
    pub fn try_from_config(config: &FileGatewayConfig) -> Option<Self> {
        let Some(api_key) = config.resolve_api_key() else {
            warn!(
                "Reasoning gateway not configured: {} is not set",
                config.api_key_env
            );
            return None;
        };
        info!(model = %config.model, base_url = %config.base_url, "Reasoning gateway configured");
        Some(
            Self::new(config.base_url.as_str(), api_key, config.model.as_str())
                .with_max_tokens(config.max_tokens)
                .with_temperature(config.temperature),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(&self, request: &TurnRequest<'_>) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: build_messages(request),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Translate a turn request into chat messages.
///
/// The speaking agent's own earlier turns become `assistant` messages;
/// everyone else's are `user` messages labelled with the speaker.
pub(super) fn build_messages(request: &TurnRequest<'_>) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(request.transcript.len() + 1);
    messages.push(ChatMessage::system(request.instruction));
    for turn in request.transcript.turns() {
        if turn.speaker == request.role {
            messages.push(ChatMessage::assistant(turn.content.as_str()));
        } else {
            messages.push(ChatMessage::user(format!(
                "[{}]: {}",
                turn.speaker, turn.content
            )));
        }
    }
    messages
}

pub(super) fn map_status(status: StatusCode, body: String, model: &str) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Authentication(body),
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited,
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(model.to_string()),
        _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status, body)),
    }
}

#[async_trait]
impl ReasoningGateway for OpenAiReasoningGateway {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: TurnRequest<'_>) -> Result<String, GatewayError> {
        let body = self.build_request(&request);
        debug!(role = request.role, messages = body.messages.len(), "Requesting completion");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_status(status, text, &self.model));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GatewayError::EmptyCompletion)
    }
}
