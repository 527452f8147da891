//! Account/session gate: registration and login.
//!
//! Single local-process trust model: passwords are compared as stored,
//! with no hashing, rate limiting or expiry.

use crate::{
    config::GameConfig,
    error::{GameError, GameResult},
    state::PersistedState,
    store::GameStore,
    types::Username,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated user. Only `login` hands these out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub session_id: Uuid,
    pub username: Username,
    pub is_admin: bool,
    pub started_at: DateTime<Utc>,
}

fn check_not_empty(username: &str, password: &str) -> GameResult<()> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(GameError::EmptyCredentials);
    }
    Ok(())
}

/// Create an account and its starting town state.
pub fn register(
    store: &GameStore,
    config: &GameConfig,
    username: &str,
    password: &str,
) -> GameResult<()> {
    check_not_empty(username, password)?;
    let starting = PersistedState::starting(config);
    if !store.insert_user(username, password, &starting)? {
        log::warn!("account: registration rejected, '{username}' already exists");
        return Err(GameError::DuplicateUser {
            username: username.to_string(),
        });
    }
    log::info!("account: registered '{username}'");
    Ok(())
}

/// Check credentials and open a session.
pub fn login(
    store: &GameStore,
    config: &GameConfig,
    username: &str,
    password: &str,
    now: DateTime<Utc>,
) -> GameResult<Session> {
    if username.trim().is_empty() || password.is_empty() {
        log::warn!("account: login rejected, empty credentials");
        return Err(GameError::InvalidCredentials);
    }
    if !store.credentials_match(username, password)? {
        log::warn!("account: login failed for '{username}'");
        return Err(GameError::InvalidCredentials);
    }
    let session = Session {
        session_id: Uuid::new_v4(),
        username: username.to_string(),
        is_admin: config.is_admin(username),
        started_at: now,
    };
    log::info!(
        "account: '{}' logged in (admin={}, session={})",
        session.username,
        session.is_admin,
        session.session_id
    );
    Ok(session)
}
