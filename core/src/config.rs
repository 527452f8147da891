use crate::types::Money;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Values a newly registered town starts with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StartingState {
    pub balance: Money,
    pub savings: Money,
    pub happiness: i64,
    pub tax_rate: i64,
}

impl Default for StartingState {
    fn default() -> Self {
        Self {
            balance: 1000,
            savings: 0,
            happiness: 50,
            tax_rate: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TaxConfig {
    pub min_rate: i64,
    pub max_rate: i64,
    /// Revenue credited per percentage point of tax.
    pub revenue_per_point: Money,
    /// Happiness changes by floor(-rate / divisor).
    pub happiness_divisor: i64,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            min_rate: 0,
            max_rate: 50,
            revenue_per_point: 10,
            happiness_divisor: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AchievementThresholds {
    pub wealthy_balance: Money,
    pub loved_happiness: i64,
    pub tax_free_rate: i64,
}

impl Default for AchievementThresholds {
    fn default() -> Self {
        Self {
            wealthy_balance: 2000,
            loved_happiness: 90,
            tax_free_rate: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub starting: StartingState,
    pub school_cost: Money,
    pub school_happiness: i64,
    pub tax: TaxConfig,
    pub quiz_reward: Money,
    pub challenge_reward: Money,
    /// Each investment draws one entry uniformly.
    pub stock_outcomes: Vec<Money>,
    /// Inclusive happiness bounds. `None` leaves happiness unbounded.
    pub happiness_bounds: Option<(i64, i64)>,
    pub achievements: AchievementThresholds,
    pub admin_username: String,
    pub report_prefix: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting: StartingState::default(),
            school_cost: 300,
            school_happiness: 10,
            tax: TaxConfig::default(),
            quiz_reward: 150,
            challenge_reward: 200,
            stock_outcomes: vec![-200, -100, 0, 100, 200, 300, 500],
            happiness_bounds: Some((0, 100)),
            achievements: AchievementThresholds::default(),
            admin_username: "admin".into(),
            report_prefix: "financeville_report_".into(),
        }
    }
}

impl GameConfig {
    /// Load from a JSON file. Fields absent from the file keep their defaults.
    /// In tests, use GameConfig::default().
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.stock_outcomes.is_empty() {
            anyhow::bail!("stock_outcomes must not be empty");
        }
        if self.tax.happiness_divisor <= 0 {
            anyhow::bail!("tax.happiness_divisor must be positive");
        }
        if self.tax.min_rate > self.tax.max_rate {
            anyhow::bail!(
                "tax.min_rate {} exceeds tax.max_rate {}",
                self.tax.min_rate,
                self.tax.max_rate
            );
        }
        if let Some((lo, hi)) = self.happiness_bounds {
            if lo > hi {
                anyhow::bail!("happiness_bounds ({lo}, {hi}) are inverted");
            }
        }
        Ok(())
    }

    /// Apply the configured happiness bounds, if any.
    pub fn clamp_happiness(&self, happiness: i64) -> i64 {
        match self.happiness_bounds {
            Some((lo, hi)) => happiness.clamp(lo, hi),
            None => happiness,
        }
    }

    pub fn is_admin(&self, username: &str) -> bool {
        username == self.admin_username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_matches_defaults() {
        let config = GameConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/../data/game.json"))
            .expect("data/game.json should load");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "school_cost": 450, "tax": { "max_rate": 30 } }"#).unwrap();
        assert_eq!(config.school_cost, 450);
        assert_eq!(config.tax.max_rate, 30);
        assert_eq!(config.tax.revenue_per_point, 10);
        assert_eq!(config.starting, StartingState::default());
        assert_eq!(config.happiness_bounds, Some((0, 100)));
    }

    #[test]
    fn unbounded_happiness_can_be_configured() {
        let config: GameConfig = serde_json::from_str(r#"{ "happiness_bounds": null }"#).unwrap();
        assert_eq!(config.clamp_happiness(250), 250);
        assert_eq!(config.clamp_happiness(-3), -3);
    }

    #[test]
    fn empty_outcome_table_is_rejected() {
        let config = GameConfig {
            stock_outcomes: Vec::new(),
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
