//! Mission entity

use super::value_objects::{CompletionReason, MissionId, MissionStatus};
use crate::conversation::entities::Conversation;
use crate::core::error::DomainError;
use crate::core::request::MissionRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One orchestration request and its tracked lifecycle (Entity)
///
/// Every state change goes through a transition method that checks
/// [`MissionStatus::can_transition_to`], so a record can never move
/// backwards or leave a terminal status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    id: MissionId,
    request: MissionRequest,
    status: MissionStatus,
    transcript: Option<Conversation>,
    outcome: Option<CompletionReason>,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    failure_reason: Option<String>,
}

impl Mission {
    /// Create a new mission in `Pending`
    pub fn new(request: MissionRequest) -> Self {
        Self {
            id: MissionId::generate(),
            request,
            status: MissionStatus::Pending,
            transcript: None,
            outcome: None,
            created_at: Utc::now(),
            started_at: None,
            ended_at: None,
            failure_reason: None,
        }
    }

    pub fn id(&self) -> MissionId {
        self.id
    }

    pub fn request(&self) -> &MissionRequest {
        &self.request
    }

    pub fn status(&self) -> MissionStatus {
        self.status
    }

    pub fn transcript(&self) -> Option<&Conversation> {
        self.transcript.as_ref()
    }

    pub fn outcome(&self) -> Option<CompletionReason> {
        self.outcome
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    // ==================== Transitions ====================

    /// Pending -> Running
    pub fn start(&mut self) -> Result<(), DomainError> {
        self.transition(MissionStatus::Running)?;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// Publish the transcript of a run that is still in progress
    pub fn record_progress(&mut self, transcript: Conversation) -> Result<(), DomainError> {
        if self.status != MissionStatus::Running {
            return Err(self.illegal(MissionStatus::Running));
        }
        self.transcript = Some(transcript);
        Ok(())
    }

    /// Running -> Completed
    pub fn complete(
        &mut self,
        transcript: Conversation,
        reason: CompletionReason,
    ) -> Result<(), DomainError> {
        self.finish(MissionStatus::Completed, Some(transcript), None)?;
        self.outcome = Some(reason);
        Ok(())
    }

    /// Running -> Failed
    pub fn fail(
        &mut self,
        transcript: Conversation,
        reason: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.finish(MissionStatus::Failed, Some(transcript), Some(reason.into()))
    }

    /// Running -> Aborted
    ///
    /// The transcript published so far (if any) is kept.
    pub fn abort(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        self.finish(MissionStatus::Aborted, None, Some(reason.into()))
    }

    /// Running -> Cancelled
    pub fn cancel(&mut self, transcript: Conversation) -> Result<(), DomainError> {
        self.finish(MissionStatus::Cancelled, Some(transcript), None)
    }

    fn finish(
        &mut self,
        status: MissionStatus,
        transcript: Option<Conversation>,
        failure_reason: Option<String>,
    ) -> Result<(), DomainError> {
        self.transition(status)?;
        if transcript.is_some() {
            self.transcript = transcript;
        }
        self.failure_reason = failure_reason;
        self.ended_at = Some(Utc::now());
        Ok(())
    }

    fn transition(&mut self, next: MissionStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(self.illegal(next));
        }
        self.status = next;
        Ok(())
    }

    fn illegal(&self, next: MissionStatus) -> DomainError {
        DomainError::InvalidTransition {
            from: self.status.to_string(),
            to: next.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mission() -> Mission {
        Mission::new(MissionRequest::try_new("Provision a staging VPC").unwrap())
    }

    fn transcript() -> Conversation {
        let mut conversation = Conversation::seeded("Initiator", "Provision a staging VPC");
        conversation.append("Planner", "1. create VPC TERMINATE");
        conversation
    }

    #[test]
    fn test_new_mission_is_pending() {
        let m = mission();
        assert_eq!(m.status(), MissionStatus::Pending);
        assert!(m.transcript().is_none());
        assert!(m.started_at().is_none());
        assert!(m.ended_at().is_none());
        assert!(m.failure_reason().is_none());
    }

    #[test]
    fn test_happy_path() {
        let mut m = mission();
        m.start().unwrap();
        assert_eq!(m.status(), MissionStatus::Running);
        assert!(m.started_at().is_some());

        m.record_progress(Conversation::seeded("Initiator", "x")).unwrap();
        assert_eq!(m.transcript().unwrap().len(), 1);

        m.complete(transcript(), CompletionReason::Terminated).unwrap();
        assert_eq!(m.status(), MissionStatus::Completed);
        assert_eq!(m.outcome(), Some(CompletionReason::Terminated));
        assert_eq!(m.transcript().unwrap().len(), 2);
        assert!(m.ended_at().is_some());
    }

    #[test]
    fn test_cannot_complete_from_pending() {
        let mut m = mission();
        let err = m.complete(transcript(), CompletionReason::Terminated).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(m.status(), MissionStatus::Pending);
    }

    #[test]
    fn test_terminal_state_is_final() {
        let mut m = mission();
        m.start().unwrap();
        m.fail(transcript(), "gateway timed out").unwrap();
        let ended_at = m.ended_at();

        assert!(m.start().is_err());
        assert!(m.abort("late fault").is_err());
        assert!(m.complete(transcript(), CompletionReason::Terminated).is_err());
        assert!(m.record_progress(transcript()).is_err());

        assert_eq!(m.status(), MissionStatus::Failed);
        assert_eq!(m.failure_reason(), Some("gateway timed out"));
        assert_eq!(m.ended_at(), ended_at);
    }

    #[test]
    fn test_abort_keeps_published_transcript() {
        let mut m = mission();
        m.start().unwrap();
        m.record_progress(transcript()).unwrap();
        m.abort("internal fault").unwrap();
        assert_eq!(m.status(), MissionStatus::Aborted);
        assert_eq!(m.transcript().unwrap().len(), 2);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut m = mission();
        m.start().unwrap();
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["status"], "running");
        assert_eq!(value["request"], "Provision a staging VPC");
        assert!(value["createdAt"].is_string());
        assert!(value["endedAt"].is_null());
        assert!(value["failureReason"].is_null());
    }
}
