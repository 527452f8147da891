//! Store methods for accounts and their saved town state.

use super::GameStore;
use crate::{error::GameResult, state::PersistedState};
use rusqlite::{params, OptionalExtension};

impl GameStore {
    // ── Users ──────────────────────────────────────────────────

    /// Insert a new account with its starting state.
    /// Returns false, and writes nothing, if the username is taken.
    pub fn insert_user(
        &self,
        username: &str,
        password: &str,
        state: &PersistedState,
    ) -> GameResult<bool> {
        let inserted = self.conn.execute(
            "INSERT INTO users (username, password, balance, savings, happiness, tax_rate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(username) DO NOTHING",
            params![
                username,
                password,
                state.balance,
                state.savings,
                state.happiness,
                state.tax_rate,
            ],
        )?;
        Ok(inserted == 1)
    }

    pub fn user_exists(&self, username: &str) -> GameResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM users WHERE username = ?1",
            params![username],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Exact match on both username and password.
    pub fn credentials_match(&self, username: &str, password: &str) -> GameResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM users WHERE username = ?1 AND password = ?2",
            params![username, password],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // ── Game state ─────────────────────────────────────────────

    pub fn load_state(&self, username: &str) -> GameResult<Option<PersistedState>> {
        let state = self
            .conn
            .query_row(
                "SELECT balance, savings, happiness, tax_rate
                 FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(PersistedState {
                        balance: row.get(0)?,
                        savings: row.get(1)?,
                        happiness: row.get(2)?,
                        tax_rate: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(state)
    }

    /// Upsert the state columns for `username`. An unknown username gets a
    /// row with an empty password, which can never log in.
    pub fn save_state(&self, username: &str, state: &PersistedState) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO users (username, password, balance, savings, happiness, tax_rate)
             VALUES (?1, '', ?2, ?3, ?4, ?5)
             ON CONFLICT(username) DO UPDATE SET
                balance   = excluded.balance,
                savings   = excluded.savings,
                happiness = excluded.happiness,
                tax_rate  = excluded.tax_rate",
            params![
                username,
                state.balance,
                state.savings,
                state.happiness,
                state.tax_rate,
            ],
        )?;
        Ok(())
    }

    pub fn user_count(&self) -> GameResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }
}
