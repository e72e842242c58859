//! Run Conversation use case
//!
//! Drives one mission's turn-taking loop:
//!
//! 1. The initiator seeds the transcript with the mission text
//! 2. Each round, the [`RoutingPolicy`] picks a speaker and the gateway is
//!    called exactly once for that speaker
//! 3. The loop stops when a turn trips the [`TerminationPredicate`], the
//!    gateway fails, the run is cancelled, or `max_rounds` is spent

use crate::ports::progress::{ConversationProgress, NoProgress};
use crate::ports::reasoning_gateway::{GatewayError, ReasoningGateway, TurnRequest};
use infraflow_domain::util::preview;
use infraflow_domain::{
    AgentSpec, Conversation, DomainError, MarkerTermination, RoundRobin, RoutingPolicy,
    TerminationPredicate, find_initiator,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Internal faults that prevent a conversation from running
///
/// These are invariant violations, not gateway failures. The lifecycle
/// manager maps them to an aborted mission.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Invalid roster: {0}")]
    InvalidRoster(#[from] DomainError),

    #[error("No eligible speaker after '{previous}'")]
    NoEligibleSpeaker { previous: String },

    #[error("max_rounds must be a positive integer")]
    InvalidRoundLimit,
}

/// How a conversation run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A turn contained the termination marker
    Terminated,
    /// All rounds were used without termination; the transcript is a partial plan
    RoundLimitReached,
    /// A gateway call errored or timed out; no partial turn was appended
    GatewayFailure(GatewayError),
    /// The cancellation token fired between turns
    Cancelled,
}

impl RunOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            RunOutcome::Terminated => "terminated",
            RunOutcome::RoundLimitReached => "round_limit_reached",
            RunOutcome::GatewayFailure(_) => "gateway_failure",
            RunOutcome::Cancelled => "cancelled",
        }
    }
}

/// Transcript plus outcome of a finished run
#[derive(Debug, Clone)]
pub struct ConversationRun {
    pub conversation: Conversation,
    pub outcome: RunOutcome,
}

/// Input for the conversation scheduler
#[derive(Debug, Clone)]
pub struct RunConversationInput<'a> {
    /// Participating agents in registration order (exactly one initiator)
    pub agents: &'a [AgentSpec],
    /// Text of the seed turn
    pub initial_text: &'a str,
    /// Maximum number of turns after the seed
    pub max_rounds: usize,
    /// Checked between turns
    pub cancellation: Option<CancellationToken>,
}

impl<'a> RunConversationInput<'a> {
    pub fn new(agents: &'a [AgentSpec], initial_text: &'a str, max_rounds: usize) -> Self {
        Self {
            agents,
            initial_text,
            max_rounds,
            cancellation: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}

/// Scheduler for a single mission's multi-agent exchange
///
/// Holds only read-only collaborators, so one instance can be shared by
/// every concurrent mission.
pub struct ConversationScheduler {
    gateway: Arc<dyn ReasoningGateway>,
    routing: Arc<dyn RoutingPolicy>,
    termination: Arc<dyn TerminationPredicate>,
    turn_timeout: Duration,
}

impl ConversationScheduler {
    pub fn new(gateway: Arc<dyn ReasoningGateway>) -> Self {
        Self {
            gateway,
            routing: Arc::new(RoundRobin),
            termination: Arc::new(MarkerTermination::default()),
            turn_timeout: Duration::from_secs(120),
        }
    }

    pub fn with_routing(mut self, routing: Arc<dyn RoutingPolicy>) -> Self {
        self.routing = routing;
        self
    }

    pub fn with_termination(mut self, termination: Arc<dyn TerminationPredicate>) -> Self {
        self.termination = termination;
        self
    }

    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout = timeout;
        self
    }

    pub fn gateway(&self) -> &Arc<dyn ReasoningGateway> {
        &self.gateway
    }

    /// Run with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunConversationInput<'_>,
    ) -> Result<ConversationRun, SchedulerError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Run with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunConversationInput<'_>,
        progress: &dyn ConversationProgress,
    ) -> Result<ConversationRun, SchedulerError> {
        if input.max_rounds == 0 {
            return Err(SchedulerError::InvalidRoundLimit);
        }
        let initiator = find_initiator(input.agents)?;

        info!(
            agents = input.agents.len(),
            max_rounds = input.max_rounds,
            routing = self.routing.name(),
            termination = self.termination.name(),
            "Starting conversation"
        );

        let mut conversation = Conversation::seeded(&initiator.role, input.initial_text);
        progress.on_turn_appended(&conversation);

        for round in 1..=input.max_rounds {
            if input.is_cancelled() {
                info!(round, "Conversation cancelled");
                return Ok(ConversationRun {
                    conversation,
                    outcome: RunOutcome::Cancelled,
                });
            }

            let speaker = self
                .routing
                .next_speaker(input.agents, &conversation)
                .ok_or_else(|| SchedulerError::NoEligibleSpeaker {
                    previous: conversation
                        .last()
                        .map(|t| t.speaker.clone())
                        .unwrap_or_default(),
                })?;
            progress.on_speaker_selected(round, speaker);
            debug!(round, speaker = %speaker.role, "Speaker selected");

            let content = match self.take_turn(speaker, &conversation).await {
                Ok(content) => content,
                Err(e) => {
                    warn!(round, speaker = %speaker.role, error = %e, "Gateway call failed");
                    return Ok(ConversationRun {
                        conversation,
                        outcome: RunOutcome::GatewayFailure(e),
                    });
                }
            };

            let terminal = self.termination.is_terminal(&content);
            debug!(round, speaker = %speaker.role, "{}", preview(&content, 120));
            conversation.append(&speaker.role, content);
            progress.on_turn_appended(&conversation);

            if terminal {
                info!(round, speaker = %speaker.role, "Termination marker received");
                return Ok(ConversationRun {
                    conversation,
                    outcome: RunOutcome::Terminated,
                });
            }
        }

        info!(rounds = input.max_rounds, "Round limit reached");
        Ok(ConversationRun {
            conversation,
            outcome: RunOutcome::RoundLimitReached,
        })
    }

    /// One gateway call, bounded by the turn timeout
    async fn take_turn(
        &self,
        speaker: &AgentSpec,
        conversation: &Conversation,
    ) -> Result<String, GatewayError> {
        let request = TurnRequest {
            role: &speaker.role,
            instruction: &speaker.instruction,
            transcript: conversation,
        };
        match tokio::time::timeout(self.turn_timeout, self.gateway.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout),
        }
    }
}
