//! The session event log.
//!
//! Every successful operation appends exactly one line describing what
//! happened. Achievement unlocks get a line of their own.
//! The log is session-local and never persisted.

use crate::{
    achievement::Achievement,
    types::{Money, QuestionId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ── Session ────────────────────────────────────
    SessionStarted {
        username: String,
    },
    GameSaved,
    ReportExported {
        path: String,
    },

    // ── Player actions ─────────────────────────────
    StocksInvested {
        outcome: Money,
    },
    SchoolBuilt {
        cost: Money,
        happiness_gain: i64,
    },
    TaxesApplied {
        rate: i64,
        revenue: Money,
        happiness_change: i64,
    },
    QuizAnswered {
        question_id: Option<QuestionId>,
        correct: bool,
        reward: Money,
    },
    ChallengeAnswered {
        correct: bool,
        reward: Money,
    },
    SavingsDeposited {
        amount: Money,
    },
    SavingsWithdrawn {
        amount: Money,
    },
    AchievementUnlocked {
        achievement: Achievement,
    },
}

impl GameEvent {
    /// Stable name, used in logs and the runner's JSON output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionStarted { .. }      => "session_started",
            Self::GameSaved                  => "game_saved",
            Self::ReportExported { .. }      => "report_exported",
            Self::StocksInvested { .. }      => "stocks_invested",
            Self::SchoolBuilt { .. }         => "school_built",
            Self::TaxesApplied { .. }        => "taxes_applied",
            Self::QuizAnswered { .. }        => "quiz_answered",
            Self::ChallengeAnswered { .. }   => "challenge_answered",
            Self::SavingsDeposited { .. }    => "savings_deposited",
            Self::SavingsWithdrawn { .. }    => "savings_withdrawn",
            Self::AchievementUnlocked { .. } => "achievement_unlocked",
        }
    }

    /// Human-readable log line.
    pub fn describe(&self) -> String {
        match self {
            Self::SessionStarted { username } => format!("Welcome back, {username}."),
            Self::GameSaved => "Game saved.".into(),
            Self::ReportExported { path } => format!("Report exported to {path}."),
            Self::StocksInvested { outcome } if *outcome >= 0 => {
                format!("Investment earned ${outcome}.")
            }
            Self::StocksInvested { outcome } => format!("Investment lost ${}.", -outcome),
            Self::SchoolBuilt { cost, happiness_gain } => {
                format!("School built for ${cost}. Happiness +{happiness_gain}%.")
            }
            Self::TaxesApplied { rate, revenue, happiness_change } => format!(
                "Tax rate set to {rate}%. Revenue: ${revenue}, Happiness: {happiness_change}%."
            ),
            Self::QuizAnswered { correct: true, reward, .. } => {
                format!("Quiz answered correctly. Earned ${reward}.")
            }
            Self::QuizAnswered { correct: false, .. } => "Quiz answered incorrectly.".into(),
            Self::ChallengeAnswered { correct: true, reward } => {
                format!("Daily challenge solved. Earned ${reward}.")
            }
            Self::ChallengeAnswered { correct: false, .. } => "Daily challenge missed.".into(),
            Self::SavingsDeposited { amount } => format!("Deposited ${amount} to savings."),
            Self::SavingsWithdrawn { amount } => format!("Withdrew ${amount} from savings."),
            Self::AchievementUnlocked { achievement } => {
                format!("Achievement unlocked: {achievement}")
            }
        }
    }
}

/// One timestamped line of the event log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub event: GameEvent,
    pub message: String,
}

impl LogEntry {
    pub fn new(at: DateTime<Utc>, event: GameEvent) -> Self {
        let message = event.describe();
        Self { at, event, message }
    }

    /// `[HH:MM:SS] message`, as shown in the activity panel.
    pub fn render(&self) -> String {
        format!("[{}] {}", self.at.format("%H:%M:%S"), self.message)
    }
}
