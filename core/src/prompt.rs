//! Multiple-choice prompts: stored quiz questions and built-in daily challenges.

use crate::{
    error::{GameError, GameResult},
    types::{OptionNumber, QuestionId, OPTION_COUNT},
};
use serde::{Deserialize, Serialize};

/// A quiz question as stored in the `quizzes` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub question: String,
    pub options: [String; OPTION_COUNT],
    pub correct_option: OptionNumber,
}

/// A question submitted by an admin, before the store assigns an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub options: [String; OPTION_COUNT],
    pub correct_option: OptionNumber,
}

impl NewQuestion {
    pub fn new(
        question: impl Into<String>,
        options: [&str; OPTION_COUNT],
        correct_option: OptionNumber,
    ) -> Self {
        Self {
            question: question.into(),
            options: options.map(str::to_string),
            correct_option,
        }
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.question.trim().is_empty() {
            return Err(GameError::InvalidQuestion {
                reason: "question text is empty".into(),
            });
        }
        if let Some(n) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(GameError::InvalidQuestion {
                reason: format!("option {} is empty", n + 1),
            });
        }
        if !is_valid_option(self.correct_option) {
            return Err(GameError::InvalidQuestion {
                reason: format!("correct option {} is not one of 1-4", self.correct_option),
            });
        }
        Ok(())
    }
}

/// The question every fresh database starts with.
pub fn default_questions() -> Vec<NewQuestion> {
    vec![NewQuestion::new(
        "What does 'inflation' mean?",
        [
            "A general increase in prices",
            "A drop in wages",
            "More taxes",
            "Lower banking interest",
        ],
        1,
    )]
}

/// A built-in daily challenge. Challenges are not stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyChallenge {
    pub question: String,
    pub options: [String; OPTION_COUNT],
    pub correct_option: OptionNumber,
}

pub fn daily_challenges() -> Vec<DailyChallenge> {
    vec![
        DailyChallenge {
            question: "You saved $100. What should you do?".into(),
            options: ["Spend", "Invest", "Burn it", "Hide it"].map(str::to_string),
            correct_option: 2,
        },
        DailyChallenge {
            question: "You got a high-interest loan. What's most important?".into(),
            options: ["Amount", "Rate", "Deadline", "Bank name"].map(str::to_string),
            correct_option: 2,
        },
    ]
}

/// The prompt currently waiting for the player's answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prompt {
    Quiz(QuizQuestion),
    Challenge(DailyChallenge),
}

impl Prompt {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Quiz(_) => "quiz",
            Self::Challenge(_) => "challenge",
        }
    }

    pub fn question(&self) -> &str {
        match self {
            Self::Quiz(q) => &q.question,
            Self::Challenge(c) => &c.question,
        }
    }

    pub fn options(&self) -> &[String; OPTION_COUNT] {
        match self {
            Self::Quiz(q) => &q.options,
            Self::Challenge(c) => &c.options,
        }
    }

    pub fn correct_option(&self) -> OptionNumber {
        match self {
            Self::Quiz(q) => q.correct_option,
            Self::Challenge(c) => c.correct_option,
        }
    }

    /// Text of the correct answer.
    pub fn correct_text(&self) -> &str {
        option_text(self.options(), self.correct_option()).unwrap_or_default()
    }
}

pub fn is_valid_option(option: OptionNumber) -> bool {
    (1..=OPTION_COUNT as OptionNumber).contains(&option)
}

/// Text of a 1-based option, if in range.
pub fn option_text(options: &[String; OPTION_COUNT], option: OptionNumber) -> Option<&str> {
    if !is_valid_option(option) {
        return None;
    }
    options.get((option - 1) as usize).map(String::as_str)
}
