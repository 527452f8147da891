//! Pure update rules.
//!
//! RULE: every function here either fails without touching the state or
//! applies its whole effect. Randomness and logging live in the engine.

use crate::{
    config::GameConfig,
    error::{GameError, GameResult},
    event::GameEvent,
    prompt::{is_valid_option, Prompt},
    state::GameState,
    types::{Money, OptionNumber},
};

/// Credit (or debit) a drawn investment outcome.
pub fn invest(state: &mut GameState, outcome: Money) -> GameEvent {
    state.balance += outcome;
    GameEvent::StocksInvested { outcome }
}

pub fn build_school(state: &mut GameState, config: &GameConfig) -> GameResult<GameEvent> {
    if state.balance < config.school_cost {
        return Err(GameError::InsufficientFunds {
            required: config.school_cost,
            available: state.balance,
        });
    }
    let before = state.happiness;
    state.balance -= config.school_cost;
    state.happiness = config.clamp_happiness(state.happiness + config.school_happiness);
    Ok(GameEvent::SchoolBuilt {
        cost: config.school_cost,
        happiness_gain: state.happiness - before,
    })
}

/// Happiness delta for a tax rate: floor(-rate / divisor).
pub fn tax_happiness_change(rate: i64, config: &GameConfig) -> i64 {
    (-rate).div_euclid(config.tax.happiness_divisor)
}

/// Set the tax rate and collect one round of revenue.
/// Every call re-applies the revenue and happiness delta.
pub fn set_tax_rate(state: &mut GameState, rate: i64, config: &GameConfig) -> GameResult<GameEvent> {
    let tax = &config.tax;
    if rate < tax.min_rate || rate > tax.max_rate {
        return Err(GameError::InvalidTaxRate {
            rate,
            min: tax.min_rate,
            max: tax.max_rate,
        });
    }
    let revenue = rate * tax.revenue_per_point;
    let before = state.happiness;
    state.tax_rate = rate;
    state.balance += revenue;
    state.happiness = config.clamp_happiness(state.happiness + tax_happiness_change(rate, config));
    Ok(GameEvent::TaxesApplied {
        rate,
        revenue,
        happiness_change: state.happiness - before,
    })
}

/// Parse player-typed money. Only whole, positive amounts are accepted.
pub fn parse_amount(input: &str) -> GameResult<Money> {
    match input.trim().parse::<Money>() {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(GameError::InvalidAmount {
            input: input.to_string(),
        }),
    }
}

pub fn deposit(state: &mut GameState, input: &str) -> GameResult<GameEvent> {
    let amount = parse_amount(input)?;
    if amount > state.balance {
        return Err(GameError::InsufficientBalance {
            required: amount,
            available: state.balance,
        });
    }
    state.balance -= amount;
    state.savings += amount;
    Ok(GameEvent::SavingsDeposited { amount })
}

pub fn withdraw(state: &mut GameState, input: &str) -> GameResult<GameEvent> {
    let amount = parse_amount(input)?;
    if amount > state.savings {
        return Err(GameError::InsufficientSavings {
            required: amount,
            available: state.savings,
        });
    }
    state.savings -= amount;
    state.balance += amount;
    Ok(GameEvent::SavingsWithdrawn { amount })
}

/// Result of answering a quiz question or daily challenge.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AnswerResult {
    pub correct: bool,
    pub reward: Money,
    /// Text of the right answer, for the "incorrect" notice.
    pub correct_answer: String,
}

/// Score an answer against a prompt and credit the reward if correct.
pub fn answer(
    state: &mut GameState,
    prompt: &Prompt,
    selected: OptionNumber,
    config: &GameConfig,
) -> GameResult<(AnswerResult, GameEvent)> {
    if !is_valid_option(selected) {
        return Err(GameError::InvalidOption { option: selected });
    }
    let correct = selected == prompt.correct_option();
    let full_reward = match prompt {
        Prompt::Quiz(_) => config.quiz_reward,
        Prompt::Challenge(_) => config.challenge_reward,
    };
    let reward = if correct { full_reward } else { 0 };
    state.balance += reward;

    let event = match prompt {
        Prompt::Quiz(q) => GameEvent::QuizAnswered {
            question_id: Some(q.id),
            correct,
            reward,
        },
        Prompt::Challenge(_) => GameEvent::ChallengeAnswered { correct, reward },
    };
    let result = AnswerResult {
        correct,
        reward,
        correct_answer: prompt.correct_text().to_string(),
    };
    Ok((result, event))
}
