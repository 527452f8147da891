//! One-time achievements unlocked by threshold predicates.

use crate::{config::AchievementThresholds, state::GameState};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Variants are checked in declaration order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    Wealthy,
    LovedByThePeople,
    TaxFreeEconomy,
}

impl Achievement {
    pub const ALL: [Achievement; 3] = [
        Achievement::Wealthy,
        Achievement::LovedByThePeople,
        Achievement::TaxFreeEconomy,
    ];

    /// The tag shown to the player.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Wealthy => "Wealthy!",
            Self::LovedByThePeople => "Loved by the People",
            Self::TaxFreeEconomy => "Tax-Free Economy",
        }
    }

    pub fn is_met(&self, state: &GameState, t: &AchievementThresholds) -> bool {
        match self {
            Self::Wealthy => state.balance >= t.wealthy_balance,
            Self::LovedByThePeople => state.happiness >= t.loved_happiness,
            Self::TaxFreeEconomy => state.tax_rate == t.tax_free_rate,
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unlock every achievement whose predicate now holds and which the
/// session has not unlocked yet. Returns only the newly unlocked ones.
pub fn check_achievements(
    state: &mut GameState,
    thresholds: &AchievementThresholds,
) -> Vec<Achievement> {
    let mut unlocked = Vec::new();
    for achievement in Achievement::ALL {
        if !state.has_achievement(achievement) && achievement.is_met(state, thresholds) {
            unlocked.push(achievement);
        }
    }
    state.achievements.extend(unlocked.iter().copied());
    unlocked
}
