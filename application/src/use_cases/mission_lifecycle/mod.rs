//! Mission Lifecycle use case
//!
//! Turns mission requests into background conversation runs and tracks
//! their state:
//!
//! 1. [`submit`](MissionLifecycleManager::submit) records the mission as
//!    `Pending`, moves it to `Running` and spawns exactly one run
//! 2. The run publishes its transcript after every turn
//! 3. When the run ends it performs the single `Running -> terminal`
//!    transition, whatever happened inside it (panics included)
//!
//! Callers observe missions only by polling
//! [`get`](MissionLifecycleManager::get); nothing here blocks on a run.

mod ledger;

pub use ledger::MissionLedger;

use crate::config::EngineConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, MissionEventKind, NoConversationLogger,
};
use crate::ports::progress::ConversationProgress;
use crate::ports::reasoning_gateway::ReasoningGateway;
use crate::use_cases::run_conversation::{
    ConversationRun, ConversationScheduler, RunConversationInput, RunOutcome,
};
use infraflow_domain::{
    AgentRegistry, CompletionReason, Conversation, DomainError, Mission, MissionId,
    MissionRequest,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, info_span, warn};

/// Errors surfaced synchronously to callers of the lifecycle manager
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Reasoning gateway is not configured")]
    NotReady,

    #[error("Mission not found: {0}")]
    NotFound(String),

    #[error("Invalid mission request: {0}")]
    InvalidRequest(String),

    #[error("Mission {0} has already finished")]
    AlreadyFinished(MissionId),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Owns the mission ledger and dispatches scheduler runs
pub struct MissionLifecycleManager {
    scheduler: Option<Arc<ConversationScheduler>>,
    registry: Option<Arc<AgentRegistry>>,
    max_rounds: usize,
    ledger: Arc<MissionLedger>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl MissionLifecycleManager {
    /// Create a manager.
    ///
    /// `scheduler` is `None` when the reasoning gateway could not be
    /// configured, `registry` is `None` when the configured roster was
    /// invalid. Either way every submission is refused with
    /// [`LifecycleError::NotReady`] for the life of the manager.
    pub fn new(
        registry: Option<Arc<AgentRegistry>>,
        max_rounds: usize,
        scheduler: Option<ConversationScheduler>,
    ) -> Result<Self, LifecycleError> {
        if max_rounds == 0 {
            return Err(LifecycleError::Configuration(
                "max_rounds must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            scheduler: scheduler.map(Arc::new),
            registry,
            max_rounds,
            ledger: Arc::new(MissionLedger::new()),
            conversation_logger: Arc::new(NoConversationLogger),
        })
    }

    /// Create a manager from engine parameters and an optional gateway
    pub fn from_config(
        registry: Option<Arc<AgentRegistry>>,
        config: &EngineConfig,
        gateway: Option<Arc<dyn ReasoningGateway>>,
    ) -> Result<Self, LifecycleError> {
        let scheduler = gateway
            .map(|g| config.build_scheduler(g))
            .transpose()
            .map_err(|e| LifecycleError::Configuration(e.to_string()))?;
        Self::new(registry, config.max_rounds, scheduler)
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Whether both a reasoning gateway and a valid roster are available
    pub fn is_ready(&self) -> bool {
        self.scheduler.is_some() && self.registry.is_some()
    }

    /// Model behind the configured gateway, if any
    pub fn gateway_model(&self) -> Option<&str> {
        self.scheduler.as_ref().map(|s| s.gateway().model())
    }

    pub fn registry(&self) -> Option<&AgentRegistry> {
        self.registry.as_deref()
    }

    /// Accept a mission and start its run in the background.
    ///
    /// Needs a tokio runtime to spawn into; without one nothing is recorded.
    /// Returns as soon as the run has been spawned.
    pub fn submit(&self, text: &str) -> Result<MissionId, LifecycleError> {
        let (Some(scheduler), Some(registry)) = (&self.scheduler, &self.registry) else {
            return Err(LifecycleError::NotReady);
        };
        let request = MissionRequest::try_new(text)
            .map_err(|e| LifecycleError::InvalidRequest(e.to_string()))?;
        let runtime = Handle::try_current()
            .map_err(|_| LifecycleError::Configuration("no async runtime".to_string()))?;

        let mission = Mission::new(request.clone());
        let id = mission.id();
        let cancellation = self.ledger.insert(mission);
        self.transition(&id, |m| m.start());

        info!(mission_id = %id, "Mission accepted");
        self.conversation_logger.log(ConversationEvent::new(
            MissionEventKind::MissionStarted,
            id,
            json!({
                "request": request.content(),
                "max_rounds": self.max_rounds,
            }),
        ));

        let run = MissionRun {
            id,
            request: request.into_content(),
            max_rounds: self.max_rounds,
            cancellation,
            scheduler: Arc::clone(scheduler),
            registry: Arc::clone(registry),
            ledger: Arc::clone(&self.ledger),
            conversation_logger: Arc::clone(&self.conversation_logger),
        };
        runtime.spawn(run.drive().instrument(info_span!("mission", mission_id = %id)));

        Ok(id)
    }

    /// Snapshot of a mission's current state
    pub fn get(&self, id: &MissionId) -> Result<Mission, LifecycleError> {
        self.ledger
            .snapshot(id)
            .ok_or_else(|| LifecycleError::NotFound(id.to_string()))
    }

    /// Snapshots of all missions, newest first
    pub fn list(&self) -> Vec<Mission> {
        self.ledger.snapshots()
    }

    /// Ask a running mission to stop before its next turn
    pub fn cancel(&self, id: &MissionId) -> Result<(), LifecycleError> {
        let mission = self.get(id)?;
        if mission.is_terminal() {
            return Err(LifecycleError::AlreadyFinished(*id));
        }
        if let Some(token) = self.ledger.cancellation(id) {
            token.cancel();
            info!(mission_id = %id, "Mission cancellation requested");
        }
        Ok(())
    }

    /// Cancel every live mission (process shutdown)
    pub fn shutdown(&self) -> usize {
        let cancelled = self.ledger.cancel_all();
        if cancelled > 0 {
            info!(cancelled, "Cancelling live missions");
        }
        cancelled
    }

    fn transition<F>(&self, id: &MissionId, f: F)
    where
        F: FnOnce(&mut Mission) -> Result<(), DomainError>,
    {
        apply(&self.ledger, id, f);
    }
}

/// Apply a transition, logging instead of failing: a rejected transition
/// means the record already holds a later status.
fn apply<F>(ledger: &MissionLedger, id: &MissionId, f: F)
where
    F: FnOnce(&mut Mission) -> Result<(), DomainError>,
{
    match ledger.update(id, f) {
        Some(Ok(())) => {}
        Some(Err(e)) => warn!(mission_id = %id, error = %e, "Mission transition rejected"),
        None => warn!(mission_id = %id, "Mission vanished from ledger"),
    }
}

/// Everything one background run owns
struct MissionRun {
    id: MissionId,
    request: String,
    max_rounds: usize,
    cancellation: CancellationToken,
    scheduler: Arc<ConversationScheduler>,
    registry: Arc<AgentRegistry>,
    ledger: Arc<MissionLedger>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl MissionRun {
    async fn drive(self) {
        let progress = LedgerProgress {
            id: self.id,
            ledger: Arc::clone(&self.ledger),
            conversation_logger: Arc::clone(&self.conversation_logger),
        };
        let scheduler = Arc::clone(&self.scheduler);
        let registry = Arc::clone(&self.registry);
        let request = self.request.clone();
        let max_rounds = self.max_rounds;
        let cancellation = self.cancellation.clone();

        // The conversation runs in its own task so a panic inside it is
        // caught here as a JoinError instead of unwinding through the ledger.
        let handle = tokio::spawn(
            async move {
                let input = RunConversationInput::new(registry.list_agents(), &request, max_rounds)
                    .with_cancellation(cancellation);
                scheduler.execute_with_progress(input, &progress).await
            }
            .in_current_span(),
        );

        match handle.await {
            Ok(Ok(run)) => self.finish(run),
            Ok(Err(e)) => {
                error!(error = %e, "Mission run faulted");
                self.abort(format!("internal fault: {}", e));
            }
            Err(e) => {
                error!(error = %e, "Mission run crashed");
                self.abort("internal fault: mission run terminated unexpectedly".to_string());
            }
        }
    }

    fn finish(&self, run: ConversationRun) {
        let ConversationRun {
            conversation,
            outcome,
        } = run;
        let turns = conversation.len();
        match outcome {
            RunOutcome::Terminated => {
                apply(&self.ledger, &self.id, |m| {
                    m.complete(conversation, CompletionReason::Terminated)
                });
            }
            RunOutcome::RoundLimitReached => {
                apply(&self.ledger, &self.id, |m| {
                    m.complete(conversation, CompletionReason::RoundLimitReached)
                });
            }
            RunOutcome::GatewayFailure(e) => {
                apply(&self.ledger, &self.id, |m| {
                    m.fail(conversation, format!("gateway failure: {}", e))
                });
            }
            RunOutcome::Cancelled => {
                apply(&self.ledger, &self.id, |m| m.cancel(conversation));
            }
        }
        info!(turns, "Mission finished");
        self.log_finished();
    }

    fn abort(&self, reason: String) {
        apply(&self.ledger, &self.id, |m| m.abort(reason));
        self.log_finished();
    }

    fn log_finished(&self) {
        let Some(mission) = self.ledger.snapshot(&self.id) else {
            return;
        };
        self.conversation_logger.log(ConversationEvent::new(
            MissionEventKind::MissionFinished,
            self.id,
            json!({
                "status": mission.status().as_str(),
                "outcome": mission.outcome().map(|o| o.as_str().to_string()),
                "failure_reason": mission.failure_reason(),
                "turns": mission.transcript().map(|t| t.len()).unwrap_or(0),
            }),
        ));
    }
}

/// Publishes every appended turn into the ledger and the conversation log
struct LedgerProgress {
    id: MissionId,
    ledger: Arc<MissionLedger>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ConversationProgress for LedgerProgress {
    fn on_turn_appended(&self, conversation: &Conversation) {
        apply(&self.ledger, &self.id, |m| {
            m.record_progress(conversation.clone())
        });
        if let Some(turn) = conversation.last() {
            self.conversation_logger.log(ConversationEvent::new(
                MissionEventKind::Turn,
                self.id,
                json!({
                    "sequence": turn.sequence,
                    "speaker": turn.speaker,
                    "content": turn.content,
                }),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::reasoning_gateway::{GatewayError, TurnRequest};
    use async_trait::async_trait;
    use infraflow_domain::{AgentSpec, MissionStatus};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // ==================== Test Mocks ====================

    /// Echoes the seed turn back, optionally failing or terminating on a given call
    struct EchoGateway {
        calls: AtomicUsize,
        terminate_on: Option<usize>,
        fail_on: Option<usize>,
        panic_on_seed: Option<&'static str>,
        delay: Duration,
    }

    impl EchoGateway {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                terminate_on: None,
                fail_on: None,
                panic_on_seed: None,
                delay: Duration::ZERO,
            }
        }

        fn terminate_on(mut self, call: usize) -> Self {
            self.terminate_on = Some(call);
            self
        }

        fn fail_on(mut self, call: usize) -> Self {
            self.fail_on = Some(call);
            self
        }

        /// Panic for every mission whose text contains `needle`
        fn panic_on_seed(mut self, needle: &'static str) -> Self {
            self.panic_on_seed = Some(needle);
            self
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl ReasoningGateway for EchoGateway {
        fn model(&self) -> &str {
            "echo"
        }

        async fn complete(&self, request: TurnRequest<'_>) -> Result<String, GatewayError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let seed = &request.transcript.turns()[0].content;
            if self.panic_on_seed.is_some_and(|needle| seed.contains(needle)) {
                panic!("gateway exploded");
            }
            if self.fail_on == Some(call) {
                return Err(GatewayError::RequestFailed("HTTP 500".to_string()));
            }
            if self.terminate_on == Some(call) {
                return Ok(format!("{} signs off on '{}'. TERMINATE", request.role, seed));
            }
            Ok(format!("{} on '{}'", request.role, seed))
        }
    }

    #[derive(Default)]
    struct MemoryLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for MemoryLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.kind.as_str());
        }
    }

    fn registry() -> Option<Arc<AgentRegistry>> {
        let registry = AgentRegistry::new(vec![
            AgentSpec::initiator("Initiator", "Relay the mission."),
            AgentSpec::new("Planner", "Plan it."),
            AgentSpec::new("Strategist", "Stress-test it."),
        ])
        .unwrap();
        Some(Arc::new(registry))
    }

    fn manager(gateway: EchoGateway, max_rounds: usize) -> MissionLifecycleManager {
        let config = EngineConfig::default().with_max_rounds(max_rounds);
        MissionLifecycleManager::from_config(registry(), &config, Some(Arc::new(gateway)))
            .unwrap()
    }

    async fn wait_terminal(manager: &MissionLifecycleManager, id: &MissionId) -> Mission {
        for _ in 0..500 {
            let mission = manager.get(id).unwrap();
            if mission.is_terminal() {
                return mission;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("mission {} did not finish", id);
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_round_limit_completes_mission() {
        let manager = manager(EchoGateway::new(), 5);
        let id = manager.submit("Plan a zero-downtime Postgres upgrade").unwrap();

        let mission = wait_terminal(&manager, &id).await;
        assert_eq!(mission.status(), MissionStatus::Completed);
        assert_eq!(mission.outcome(), Some(CompletionReason::RoundLimitReached));
        assert_eq!(mission.transcript().unwrap().len(), 6);
        assert!(mission.failure_reason().is_none());
        assert!(mission.ended_at().is_some());
    }

    #[tokio::test]
    async fn test_termination_marker_completes_mission() {
        let manager = manager(EchoGateway::new().terminate_on(2), 5);
        let id = manager.submit("Decommission the legacy VPN").unwrap();

        let mission = wait_terminal(&manager, &id).await;
        assert_eq!(mission.status(), MissionStatus::Completed);
        assert_eq!(mission.outcome(), Some(CompletionReason::Terminated));
        assert_eq!(mission.transcript().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_gateway_failure_fails_mission() {
        let manager = manager(EchoGateway::new().fail_on(1), 5);
        let id = manager.submit("Audit IAM roles").unwrap();

        let mission = wait_terminal(&manager, &id).await;
        assert_eq!(mission.status(), MissionStatus::Failed);
        assert!(!mission.failure_reason().unwrap().is_empty());
        assert!(mission.failure_reason().unwrap().contains("HTTP 500"));
        assert_eq!(mission.transcript().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_not_ready_creates_no_record() {
        let manager = MissionLifecycleManager::new(registry(), 5, None).unwrap();
        assert!(!manager.is_ready());
        assert_eq!(manager.submit("anything"), Err(LifecycleError::NotReady));
        assert!(manager.list().is_empty());
    }

    #[tokio::test]
    async fn test_blank_request_rejected() {
        let manager = manager(EchoGateway::new(), 5);
        assert!(matches!(
            manager.submit("   "),
            Err(LifecycleError::InvalidRequest(_))
        ));
        assert!(manager.list().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_mission_not_found() {
        let manager = manager(EchoGateway::new(), 5);
        let id = MissionId::generate();
        assert_eq!(manager.get(&id), Err(LifecycleError::NotFound(id.to_string())));
        assert!(matches!(manager.cancel(&id), Err(LifecycleError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_roster_is_not_ready() {
        let config = EngineConfig::default();
        let gateway: Arc<dyn ReasoningGateway> = Arc::new(EchoGateway::new());
        let manager = MissionLifecycleManager::from_config(None, &config, Some(gateway)).unwrap();
        assert!(!manager.is_ready());
        assert!(manager.registry().is_none());
        assert_eq!(manager.submit("Patch the bastion"), Err(LifecycleError::NotReady));
        assert!(manager.list().is_empty());
    }

    #[test]
    fn test_submit_outside_runtime_records_nothing() {
        let manager = manager(EchoGateway::new(), 3);
        assert!(matches!(
            manager.submit("Rotate the signing keys"),
            Err(LifecycleError::Configuration(_))
        ));
        assert!(manager.list().is_empty());
    }

    #[test]
    fn test_zero_rounds_is_a_configuration_error() {
        let result = MissionLifecycleManager::new(registry(), 0, None);
        assert!(matches!(result, Err(LifecycleError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_submit_returns_while_running() {
        let manager = manager(EchoGateway::new().with_delay(Duration::from_millis(50)), 3);
        let id = manager.submit("Roll out the new ingress").unwrap();

        // Pending -> Running happens before submit returns
        let mission = manager.get(&id).unwrap();
        assert_eq!(mission.status(), MissionStatus::Running);
        assert!(mission.started_at().is_some());

        wait_terminal(&manager, &id).await;
    }

    #[tokio::test]
    async fn test_status_is_monotonic() {
        let manager = manager(EchoGateway::new().with_delay(Duration::from_millis(2)), 6);
        let id = manager.submit("Move logs to cold storage").unwrap();

        let mut ranks = Vec::new();
        loop {
            let mission = manager.get(&id).unwrap();
            ranks.push(mission.status().rank());
            if mission.is_terminal() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*ranks.last().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_panicking_run_is_aborted_without_affecting_others() {
        let manager = manager(EchoGateway::new().panic_on_seed("FAULT"), 3);

        let crashed_id = manager.submit("Trigger the FAULT").unwrap();
        let healthy_id = manager.submit("Carry on").unwrap();

        let crashed = wait_terminal(&manager, &crashed_id).await;
        assert_eq!(crashed.status(), MissionStatus::Aborted);
        assert!(crashed.failure_reason().unwrap().starts_with("internal fault"));
        // The seed turn published before the crash is kept
        assert_eq!(crashed.transcript().unwrap().len(), 1);

        let ok = wait_terminal(&manager, &healthy_id).await;
        assert_eq!(ok.status(), MissionStatus::Completed);
        assert_eq!(ok.transcript().unwrap().len(), 4);
        assert_eq!(manager.list().len(), 2);
        assert!(manager.is_ready());
    }

    #[tokio::test]
    async fn test_cancel_running_mission() {
        let manager = manager(EchoGateway::new().with_delay(Duration::from_millis(20)), 1000);
        let id = manager.submit("Long-running migration").unwrap();

        manager.cancel(&id).unwrap();
        let mission = wait_terminal(&manager, &id).await;
        assert_eq!(mission.status(), MissionStatus::Cancelled);
        assert!(mission.transcript().unwrap().rounds() < 1000);

        assert_eq!(manager.cancel(&id), Err(LifecycleError::AlreadyFinished(id)));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_live_missions() {
        let manager = manager(EchoGateway::new().with_delay(Duration::from_millis(20)), 1000);
        let a = manager.submit("first").unwrap();
        let b = manager.submit("second").unwrap();

        assert_eq!(manager.shutdown(), 2);
        assert_eq!(wait_terminal(&manager, &a).await.status(), MissionStatus::Cancelled);
        assert_eq!(wait_terminal(&manager, &b).await.status(), MissionStatus::Cancelled);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_missions_are_isolated() {
        let manager = Arc::new(manager(
            EchoGateway::new().with_delay(Duration::from_millis(1)),
            4,
        ));

        let mut submitted = Vec::new();
        for i in 0..24 {
            let manager = Arc::clone(&manager);
            submitted.push(tokio::spawn(async move {
                let text = format!("mission-{i}");
                (manager.submit(&text).unwrap(), text)
            }));
        }

        for handle in submitted {
            let (id, text) = handle.await.unwrap();
            let mission = wait_terminal(&manager, &id).await;
            let transcript = mission.transcript().unwrap();
            assert_eq!(transcript.len(), 5);
            assert_eq!(transcript.turns()[0].content, text);
            for turn in &transcript.turns()[1..] {
                assert!(turn.content.ends_with(&format!("'{}'", text)));
            }
        }
        assert_eq!(manager.list().len(), 24);
    }

    #[tokio::test]
    async fn test_conversation_log_events() {
        let logger = Arc::new(MemoryLogger::default());
        let manager = manager(EchoGateway::new(), 2).with_conversation_logger(logger.clone());
        let id = manager.submit("Tag all untagged volumes").unwrap();
        wait_terminal(&manager, &id).await;

        // The final event is written after the terminal transition
        for _ in 0..100 {
            if logger.events.lock().unwrap().len() == 5 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(
            *logger.events.lock().unwrap(),
            vec!["mission_started", "turn", "turn", "turn", "mission_finished"]
        );
    }
}
