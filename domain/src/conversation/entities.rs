//! Conversation entities

use serde::{Deserialize, Serialize};

/// One agent utterance (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Role of the agent that spoke
    pub speaker: String,
    /// Utterance text, stored verbatim
    pub content: String,
    /// Position within the conversation; the seed turn is 0
    pub sequence: u64,
}

/// Ordered, append-only transcript of one mission run (Entity)
///
/// Owned by exactly one scheduler run. Turns can only be appended, and the
/// sequence numbers are assigned here so they always increase by one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Start a conversation with the initiator's seed turn
    pub fn seeded(initiator: impl Into<String>, text: impl Into<String>) -> Self {
        let mut conversation = Self::default();
        conversation.append(initiator, text);
        conversation
    }

    /// Append a turn and return it
    pub fn append(&mut self, speaker: impl Into<String>, content: impl Into<String>) -> &Turn {
        let sequence = self.turns.len() as u64;
        self.turns.push(Turn {
            speaker: speaker.into(),
            content: content.into(),
            sequence,
        });
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of turns produced after the seed turn
    pub fn rounds(&self) -> usize {
        self.turns.len().saturating_sub(1)
    }

    /// Render the transcript as `[speaker]: content` blocks
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("[{}]: {}", t.speaker, t.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_conversation() {
        let conversation = Conversation::seeded("Initiator", "Deploy the cache tier");
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.rounds(), 0);
        let seed = conversation.last().unwrap();
        assert_eq!(seed.speaker, "Initiator");
        assert_eq!(seed.sequence, 0);
    }

    #[test]
    fn test_sequence_is_monotonic() {
        let mut conversation = Conversation::seeded("Initiator", "go");
        conversation.append("Planner", "step 1");
        conversation.append("Strategist", "looks fine");
        let sequences: Vec<_> = conversation.turns().iter().map(|t| t.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2]);
        assert_eq!(conversation.rounds(), 2);
    }

    #[test]
    fn test_render() {
        let mut conversation = Conversation::seeded("Initiator", "go");
        conversation.append("Planner", "step 1");
        assert_eq!(conversation.render(), "[Initiator]: go\n\n[Planner]: step 1");
    }

    #[test]
    fn test_serializes_as_turn_array() {
        let conversation = Conversation::seeded("Initiator", "go");
        let value = serde_json::to_value(&conversation).unwrap();
        assert_eq!(value[0]["speaker"], "Initiator");
        assert_eq!(value[0]["sequence"], 0);
    }
}
