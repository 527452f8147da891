use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("User '{username}' already exists")]
    DuplicateUser { username: String },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username and password must not be empty")]
    EmptyCredentials,

    #[error("User '{username}' not found")]
    UserNotFound { username: String },

    #[error("Not enough money: need {required}, have {available}")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("Not enough balance: need {required}, have {available}")]
    InsufficientBalance { required: i64, available: i64 },

    #[error("Not enough savings: need {required}, have {available}")]
    InsufficientSavings { required: i64, available: i64 },

    #[error("Invalid amount: '{input}'")]
    InvalidAmount { input: String },

    #[error("Tax rate {rate} outside [{min}, {max}]")]
    InvalidTaxRate { rate: i64, min: i64, max: i64 },

    #[error("Option {option} is not one of 1-4")]
    InvalidOption { option: i64 },

    #[error("No quiz questions available")]
    NoQuizAvailable,

    #[error("No {kind} is waiting for an answer")]
    NoPendingPrompt { kind: &'static str },

    #[error("Invalid question: {reason}")]
    InvalidQuestion { reason: String },

    #[error("Admin session required")]
    AdminRequired,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GameError {
    /// True for errors raised by a game rule rather than the infrastructure.
    /// Rule errors are reported to the player and never end the session.
    pub fn is_rule_violation(&self) -> bool {
        !matches!(
            self,
            Self::Database(_) | Self::Serialization(_) | Self::Io(_) | Self::Other(_)
        )
    }
}

pub type GameResult<T> = Result<T, GameError>;
