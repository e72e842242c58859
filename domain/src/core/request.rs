//! Mission request value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The natural-language text of a mission (Value Object)
///
/// Always non-blank. This is the text the initiator seeds the
/// conversation with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionRequest {
    content: String,
}

impl MissionRequest {
    /// Create a request, rejecting empty or whitespace-only text
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::InvalidRequest(
                "mission text cannot be empty".to_string(),
            ));
        }
        Ok(Self { content })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for MissionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
