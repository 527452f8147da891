//! Shared primitive types used across the entire game.

/// Currency units. Whole dollars; the game never deals in cents.
pub type Money = i64;

/// The unique account identifier.
pub type Username = String;

/// Quiz question primary key, assigned by the store on insert.
pub type QuestionId = i64;

/// Answers are numbered 1 through 4.
pub type OptionNumber = i64;

/// Every quiz question and daily challenge has exactly this many options.
pub const OPTION_COUNT: usize = 4;
