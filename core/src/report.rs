//! Plain-text report export.

use crate::{error::GameResult, state::GameState};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Render the report body. Field order is fixed:
/// balance, savings, happiness, tax rate, achievements, export time.
pub fn render_report(username: &str, state: &GameState, exported_at: DateTime<Utc>) -> String {
    let achievements = if state.achievements.is_empty() {
        "None".to_string()
    } else {
        state
            .achievements
            .iter()
            .map(|a| a.label())
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "FinanceVille Report for {username}\n\
         Balance: ${}\n\
         Savings: ${}\n\
         Happiness: {}%\n\
         Tax Rate: {}%\n\
         Achievements: {achievements}\n\
         Exported at: {}\n",
        state.balance,
        state.savings,
        state.happiness,
        state.tax_rate,
        exported_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

/// `<prefix><username>.txt`. ASCII letters, digits and `-` pass through, as
/// does `.` anywhere but the first position. Every other byte of the
/// username, `_` included, becomes `_XX` (uppercase hex), so the name stays
/// inside the export directory and distinct usernames never share a file.
pub fn report_file_name(prefix: &str, username: &str) -> String {
    let mut safe = String::with_capacity(username.len());
    for (i, byte) in username.bytes().enumerate() {
        let keep = byte.is_ascii_alphanumeric() || byte == b'-' || (byte == b'.' && i > 0);
        if keep {
            safe.push(char::from(byte));
        } else {
            safe.push_str(&format!("_{byte:02X}"));
        }
    }
    format!("{prefix}{safe}.txt")
}

/// Write the report into `dir`, overwriting any previous export.
pub fn write_report(dir: &Path, file_name: &str, body: &str) -> GameResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, body)?;
    Ok(path)
}
