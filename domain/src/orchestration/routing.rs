//! Speaker routing
//!
//! A [`RoutingPolicy`] picks the next agent to speak. Policies are pure
//! functions of the roster and the transcript so a given conversation
//! always routes the same way.

use crate::agent::entities::AgentSpec;
use crate::conversation::entities::Conversation;

/// Rule for choosing the next speaker in a conversation
pub trait RoutingPolicy: Send + Sync {
    /// Short policy name for logs
    fn name(&self) -> &'static str;

    /// Choose the next speaker among the non-initiator agents.
    ///
    /// Returns `None` only when no non-initiator agent exists.
    fn next_speaker<'a>(
        &self,
        agents: &'a [AgentSpec],
        transcript: &Conversation,
    ) -> Option<&'a AgentSpec>;
}

/// Fixed rotation in registration order
///
/// The next speaker is the first non-initiator registered after the previous
/// speaker, wrapping to the head of the list. The previous speaker is only
/// chosen again when it is the sole candidate. Whenever more than one agent
/// could qualify, the lowest registration index wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin;

impl RoutingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "round_robin"
    }

    fn next_speaker<'a>(
        &self,
        agents: &'a [AgentSpec],
        transcript: &Conversation,
    ) -> Option<&'a AgentSpec> {
        let previous = transcript.last().map(|t| t.speaker.as_str());
        let previous_index = previous.and_then(|role| agents.iter().position(|a| a.role == role));

        let eligible = |a: &&AgentSpec| !a.is_initiator && Some(a.role.as_str()) != previous;

        let after = previous_index
            .and_then(|p| agents.iter().skip(p + 1).find(|a| eligible(a)));

        after
            .or_else(|| agents.iter().find(|a| eligible(a)))
            .or_else(|| agents.iter().find(|a| !a.is_initiator))
    }
}
