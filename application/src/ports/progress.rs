//! Conversation progress port
//!
//! Lets the caller of a conversation run observe it while it happens.

use infraflow_domain::{AgentSpec, Conversation};

/// Callback for progress updates during a conversation run
pub trait ConversationProgress: Send + Sync {
    /// Called when the routing policy has chosen the speaker for a round
    fn on_speaker_selected(&self, _round: usize, _speaker: &AgentSpec) {}

    /// Called after a turn (including the seed turn) has been appended
    fn on_turn_appended(&self, conversation: &Conversation);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ConversationProgress for NoProgress {
    fn on_turn_appended(&self, _conversation: &Conversation) {}
}
