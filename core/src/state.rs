//! The per-user town state.

use crate::{
    achievement::Achievement,
    config::GameConfig,
    event::LogEntry,
    types::Money,
};
use serde::{Deserialize, Serialize};

/// Fields written to the `users` table on save.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedState {
    pub balance: Money,
    pub savings: Money,
    pub happiness: i64,
    pub tax_rate: i64,
}

impl PersistedState {
    pub fn starting(config: &GameConfig) -> Self {
        let s = &config.starting;
        Self {
            balance: s.balance,
            savings: s.savings,
            happiness: s.happiness,
            tax_rate: s.tax_rate,
        }
    }
}

/// One session's full state. Achievements and the event log live only
/// for the session; everything else round-trips through the store.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub balance: Money,
    pub savings: Money,
    pub happiness: i64,
    pub tax_rate: i64,
    pub achievements: Vec<Achievement>,
    pub event_log: Vec<LogEntry>,
}

impl GameState {
    pub fn starting(config: &GameConfig) -> Self {
        Self::from_persisted(PersistedState::starting(config))
    }

    pub fn from_persisted(p: PersistedState) -> Self {
        Self {
            balance: p.balance,
            savings: p.savings,
            happiness: p.happiness,
            tax_rate: p.tax_rate,
            achievements: Vec::new(),
            event_log: Vec::new(),
        }
    }

    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            balance: self.balance,
            savings: self.savings,
            happiness: self.happiness,
            tax_rate: self.tax_rate,
        }
    }

    /// Balance plus savings. Transfers between the two never change it.
    pub fn net_worth(&self) -> Money {
        self.balance + self.savings
    }

    pub fn has_achievement(&self, achievement: Achievement) -> bool {
        self.achievements.contains(&achievement)
    }
}
