//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The engine and the account gate call store methods; they never execute SQL directly.

use crate::{error::GameResult, prompt::NewQuestion};
use rusqlite::{params, Connection, OptionalExtension};

mod quiz;
mod user;

const DEFAULT_QUESTIONS_SEEDED: &str = "default_questions_seeded";

pub struct GameStore {
    conn: Connection,
}

impl GameStore {
    pub fn open(path: &str) -> GameResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        log::debug!("store: opened {path}");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> GameResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn })
    }

    /// Create every table that does not exist yet. Safe to call on every start.
    pub fn create_schema_if_absent(&self) -> GameResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_users.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_quizzes.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/003_schema_meta.sql"))?;
        Ok(())
    }

    /// Insert the built-in questions the first time a database is set up.
    /// Later calls do nothing, even if an admin has since deleted them.
    /// Returns how many questions were inserted.
    pub fn seed_questions_once(&self, questions: &[NewQuestion]) -> GameResult<usize> {
        if self.meta_value(DEFAULT_QUESTIONS_SEEDED)?.is_some() {
            return Ok(0);
        }
        let tx = self.conn.unchecked_transaction()?;
        for q in questions {
            self.insert_question(q)?;
        }
        self.set_meta_value(DEFAULT_QUESTIONS_SEEDED, "1")?;
        tx.commit()?;
        log::info!("store: seeded {} default quiz questions", questions.len());
        Ok(questions.len())
    }

    /// Schema creation plus default question seeding, in one call.
    pub fn bootstrap(&self) -> GameResult<()> {
        self.create_schema_if_absent()?;
        self.seed_questions_once(&crate::prompt::default_questions())?;
        Ok(())
    }

    // ── Meta ───────────────────────────────────────────────────

    fn meta_value(&self, key: &str) -> GameResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM schema_meta WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_meta_value(&self, key: &str, value: &str) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO schema_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}
