//! Conversation transcript
//!
//! The ordered turn history exchanged with the model for one session.
//! Append-only: turns are never mutated once written, held fully in memory,
//! and discarded at process exit.

use crate::core::{ContentBlock, Message, ToolOutcome};

/// The session transcript
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Message>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Append a user text turn
    pub fn push_user_text(&mut self, text: impl Into<String>) {
        self.turns.push(Message::user_text(text));
    }

    /// Append the assistant's raw content as a new turn
    pub fn push_assistant(&mut self, content: Vec<ContentBlock>) {
        self.turns.push(Message::assistant(content));
    }

    /// Append one round's tool results as a single turn
    pub fn push_tool_results(&mut self, outcomes: Vec<ToolOutcome>) {
        self.turns.push(Message::tool_results(outcomes));
    }

    /// All turns, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.turns
    }

    /// The most recent turn
    pub fn last(&self) -> Option<&Message> {
        self.turns.last()
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Forget the history (REPL `clear` command)
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
