//! Mission value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionId(Uuid);

impl MissionId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for MissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MissionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::InvalidMissionId(s.to_string()))
    }
}

/// Lifecycle status of a mission
///
/// ```text
/// Pending -> Running -> Completed | Failed | Aborted | Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Aborted,
    Cancelled,
}

impl MissionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MissionStatus::Pending => "pending",
            MissionStatus::Running => "running",
            MissionStatus::Completed => "completed",
            MissionStatus::Failed => "failed",
            MissionStatus::Aborted => "aborted",
            MissionStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MissionStatus::Completed
                | MissionStatus::Failed
                | MissionStatus::Aborted
                | MissionStatus::Cancelled
        )
    }

    /// Position in the lifecycle ordering (terminal statuses share a rank)
    pub fn rank(&self) -> u8 {
        match self {
            MissionStatus::Pending => 0,
            MissionStatus::Running => 1,
            _ => 2,
        }
    }

    /// Whether `self -> next` is a legal transition
    pub fn can_transition_to(&self, next: MissionStatus) -> bool {
        match self {
            MissionStatus::Pending => next == MissionStatus::Running,
            MissionStatus::Running => next.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a mission completed normally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    /// An agent emitted the termination marker
    Terminated,
    /// The round budget ran out; the transcript is a partial plan
    RoundLimitReached,
}

impl CompletionReason {
    pub fn as_str(&self) -> &str {
        match self {
            CompletionReason::Terminated => "terminated",
            CompletionReason::RoundLimitReached => "round_limit_reached",
        }
    }
}

impl std::fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MissionStatus; 6] = [
        MissionStatus::Pending,
        MissionStatus::Running,
        MissionStatus::Completed,
        MissionStatus::Failed,
        MissionStatus::Aborted,
        MissionStatus::Cancelled,
    ];

    #[test]
    fn test_mission_id_roundtrip() {
        let id = MissionId::generate();
        let parsed: MissionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_mission_id_rejects_garbage() {
        let err = "not-a-uuid".parse::<MissionId>().unwrap_err();
        assert_eq!(err, DomainError::InvalidMissionId("not-a-uuid".to_string()));
    }

    #[test]
    fn test_transitions_are_forward_only() {
        for from in ALL {
            for to in ALL {
                if from.can_transition_to(to) {
                    assert!(to.rank() > from.rank(), "{from} -> {to} must move forward");
                }
            }
        }
    }

    #[test]
    fn test_terminal_statuses_never_move() {
        for from in ALL.iter().filter(|s| s.is_terminal()) {
            assert!(ALL.iter().all(|to| !from.can_transition_to(*to)));
        }
    }

    #[test]
    fn test_pending_cannot_skip_running() {
        assert!(!MissionStatus::Pending.can_transition_to(MissionStatus::Completed));
        assert!(MissionStatus::Pending.can_transition_to(MissionStatus::Running));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&MissionStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        let json = serde_json::to_string(&CompletionReason::RoundLimitReached).unwrap();
        assert_eq!(json, "\"round_limit_reached\"");
    }
}
