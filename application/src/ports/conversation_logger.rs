//! Port for structured mission transcript logging.
//!
//! Separate from `tracing`: tracing carries operator diagnostics, this port
//! carries the mission record itself (start, each turn, final status) for
//! later replay or audit.

use infraflow_domain::MissionId;
use serde_json::Value;
use std::fmt;

/// What happened to a mission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionEventKind {
    MissionStarted,
    Turn,
    MissionFinished,
}

impl MissionEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionEventKind::MissionStarted => "mission_started",
            MissionEventKind::Turn => "turn",
            MissionEventKind::MissionFinished => "mission_finished",
        }
    }
}

impl fmt::Display for MissionEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record in a mission's transcript log
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    pub kind: MissionEventKind,
    pub mission_id: MissionId,
    /// Kind-specific fields
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(kind: MissionEventKind, mission_id: MissionId, payload: Value) -> Self {
        Self {
            kind,
            mission_id,
            payload,
        }
    }
}

/// Sink for mission events.
///
/// `log` is synchronous and infallible: a logging failure must never
/// disturb a running mission.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards everything
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
