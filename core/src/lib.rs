//! FinanceVille core: the town-finance state model, its update rules,
//! the account gate and the SQLite-backed store.

pub mod account;
pub mod achievement;
pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod prompt;
pub mod report;
pub mod rng;
pub mod rules;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod types;
