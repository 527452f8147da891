//! Store methods for quiz questions.

use super::GameStore;
use crate::{
    error::GameResult,
    prompt::{NewQuestion, QuizQuestion},
    types::QuestionId,
};
use rusqlite::{params, OptionalExtension, Row};

const QUESTION_COLUMNS: &str =
    "id, question, option1, option2, option3, option4, correct_option";

fn question_from_row(row: &Row<'_>) -> rusqlite::Result<QuizQuestion> {
    Ok(QuizQuestion {
        id: row.get(0)?,
        question: row.get(1)?,
        options: [row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?],
        correct_option: row.get(6)?,
    })
}

impl GameStore {
    // ── Quiz questions ─────────────────────────────────────────

    pub fn list_questions(&self) -> GameResult<Vec<QuizQuestion>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {QUESTION_COLUMNS} FROM quizzes ORDER BY id ASC"))?;
        let rows = stmt.query_map([], question_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Insert a question and return the id the database assigned.
    /// Callers validate the question first.
    pub fn insert_question(&self, q: &NewQuestion) -> GameResult<QuestionId> {
        let [o1, o2, o3, o4] = &q.options;
        self.conn.execute(
            "INSERT INTO quizzes (question, option1, option2, option3, option4, correct_option)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![q.question, o1, o2, o3, o4, q.correct_option],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Delete by id. Deleting a missing id is a no-op; returns whether a row went away.
    pub fn delete_question(&self, id: QuestionId) -> GameResult<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM quizzes WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    pub fn question_count(&self) -> GameResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM quizzes", [], |row| row.get(0))?;
        Ok(count)
    }

    /// The question at position `offset` in id order, used for uniform draws.
    pub fn question_at(&self, offset: i64) -> GameResult<Option<QuizQuestion>> {
        let q = self
            .conn
            .query_row(
                &format!("SELECT {QUESTION_COLUMNS} FROM quizzes ORDER BY id ASC LIMIT 1 OFFSET ?1"),
                params![offset],
                question_from_row,
            )
            .optional()?;
        Ok(q)
    }
}
