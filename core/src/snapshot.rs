//! Read-only view of a session for the presentation layer.
//!
//! The display re-reads a snapshot after every command instead of
//! holding references into the engine.

use crate::{achievement::Achievement, event::LogEntry, prompt::Prompt, types::Money};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingPromptView {
    pub kind: String,
    pub question: String,
    pub options: Vec<String>,
}

/// The player-facing part of a prompt. The correct option stays in the engine.
impl From<&Prompt> for PendingPromptView {
    fn from(prompt: &Prompt) -> Self {
        Self {
            kind: prompt.kind().to_string(),
            question: prompt.question().to_string(),
            options: prompt.options().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateSnapshot {
    pub username: String,
    pub is_admin: bool,
    pub balance: Money,
    pub savings: Money,
    pub happiness: i64,
    pub tax_rate: i64,
    pub achievements: Vec<Achievement>,
    pub unsaved_changes: bool,
    pub pending_prompt: Option<PendingPromptView>,
    /// The most recent log lines, oldest first.
    pub recent_log: Vec<LogEntry>,
}

/// How many log lines a snapshot carries.
pub const RECENT_LOG_LINES: usize = 10;
