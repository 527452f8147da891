use crate::{
    achievement::Achievement,
    event::GameEvent,
    prompt::{NewQuestion, QuizQuestion},
    rules::AnswerResult,
    snapshot::PendingPromptView,
    types::{OptionNumber, QuestionId},
};
use serde::{Deserialize, Serialize};

/// All player-issued commands.
/// Amounts arrive as typed text and are parsed by the rule that uses them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Town actions ──────────────────────────────
    InvestStocks,
    BuildSchool,
    SetTaxRate { rate: i64 },

    // ── Prompts ───────────────────────────────────
    StartQuiz,
    AnswerQuiz { option: OptionNumber },
    StartChallenge,
    AnswerChallenge { option: OptionNumber },

    // ── Savings ───────────────────────────────────
    Deposit { amount: String },
    Withdraw { amount: String },

    // ── Session ───────────────────────────────────
    SaveGame,
    ExportReport { dir: String },

    // ── Admin ─────────────────────────────────────
    ListQuestions,
    AddQuestion { question: NewQuestion },
    DeleteQuestion { id: QuestionId },
}

/// The typed result of one command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// A town action or savings transfer went through; the event carries its effect.
    Applied { event: GameEvent },
    PromptStarted { prompt: PendingPromptView },
    Answered { answer: AnswerResult },
    Saved,
    Exported { path: String },
    Questions { questions: Vec<QuizQuestion> },
    QuestionAdded { id: QuestionId },
    QuestionDeleted { id: QuestionId, existed: bool },
}

/// What `GameEngine::apply` returns: the outcome plus any achievements
/// the command unlocked.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommandOutcome {
    pub outcome: Outcome,
    pub unlocked: Vec<Achievement>,
}
