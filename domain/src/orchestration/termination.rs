//! Termination detection
//!
//! The scheduler asks a single [`TerminationPredicate`] whether an
//! utterance ends the exchange. Swapping the predicate changes the
//! termination contract without touching the turn loop.

use crate::core::error::DomainError;

/// Marker used when none is configured
pub const DEFAULT_TERMINATION_MARKER: &str = "TERMINATE";

/// Decides whether an utterance ends the conversation
pub trait TerminationPredicate: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_terminal(&self, content: &str) -> bool;
}

/// Case-insensitive substring match on a reserved marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerTermination {
    marker: String,
    needle: String,
}

impl MarkerTermination {
    pub fn new(marker: impl Into<String>) -> Result<Self, DomainError> {
        let marker = marker.into();
        if marker.trim().is_empty() {
            return Err(DomainError::Configuration(
                "termination marker cannot be empty".to_string(),
            ));
        }
        let needle = marker.to_lowercase();
        Ok(Self { marker, needle })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl Default for MarkerTermination {
    fn default() -> Self {
        Self {
            marker: DEFAULT_TERMINATION_MARKER.to_string(),
            needle: DEFAULT_TERMINATION_MARKER.to_lowercase(),
        }
    }
}

impl TerminationPredicate for MarkerTermination {
    fn name(&self) -> &'static str {
        "marker"
    }

    fn is_terminal(&self, content: &str) -> bool {
        content.to_lowercase().contains(&self.needle)
    }
}
