//! Account gate tests: registration, login, admin detection.

use chrono::Utc;
use financeville_core::{
    account,
    config::GameConfig,
    error::GameError,
    state::PersistedState,
    store::GameStore,
};

fn fresh_store() -> GameStore {
    let store = GameStore::in_memory().expect("in-memory store");
    store.bootstrap().expect("bootstrap");
    store
}

#[test]
fn registration_creates_default_state() {
    let store = fresh_store();
    let config = GameConfig::default();
    account::register(&store, &config, "carol", "pw").unwrap();

    assert!(store.user_exists("carol").unwrap());
    assert_eq!(
        store.load_state("carol").unwrap(),
        Some(PersistedState { balance: 1000, savings: 0, happiness: 50, tax_rate: 10 })
    );
}

#[test]
fn duplicate_registration_is_rejected_and_keeps_the_first_password() {
    let store = fresh_store();
    let config = GameConfig::default();
    account::register(&store, &config, "carol", "first").unwrap();

    let err = account::register(&store, &config, "carol", "second").unwrap_err();
    assert!(
        matches!(&err, GameError::DuplicateUser { username } if username == "carol"),
        "unexpected error: {err}"
    );
    assert_eq!(store.user_count().unwrap(), 1);
    assert!(store.credentials_match("carol", "first").unwrap());
    assert!(!store.credentials_match("carol", "second").unwrap());
}

#[test]
fn empty_credentials_are_refused() {
    let store = fresh_store();
    let config = GameConfig::default();
    assert!(matches!(
        account::register(&store, &config, "  ", "pw"),
        Err(GameError::EmptyCredentials)
    ));
    assert!(matches!(
        account::register(&store, &config, "dave", ""),
        Err(GameError::EmptyCredentials)
    ));
    assert_eq!(store.user_count().unwrap(), 0);
}

#[test]
fn login_requires_an_exact_match() {
    let store = fresh_store();
    let config = GameConfig::default();
    account::register(&store, &config, "erin", "Secret").unwrap();

    for (user, pass) in [("erin", "secret"), ("Erin", "Secret"), ("nobody", "Secret"), ("erin", "")] {
        assert!(
            matches!(
                account::login(&store, &config, user, pass, Utc::now()),
                Err(GameError::InvalidCredentials)
            ),
            "{user}/{pass} should not log in"
        );
    }

    let session = account::login(&store, &config, "erin", "Secret", Utc::now()).unwrap();
    assert_eq!(session.username, "erin");
    assert!(!session.is_admin);
}

#[test]
fn only_the_admin_username_gets_admin_sessions() {
    let store = fresh_store();
    let config = GameConfig::default();
    account::register(&store, &config, "admin", "root").unwrap();
    account::register(&store, &config, "administrator", "root").unwrap();

    let admin = account::login(&store, &config, "admin", "root", Utc::now()).unwrap();
    let other = account::login(&store, &config, "administrator", "root", Utc::now()).unwrap();
    assert!(admin.is_admin);
    assert!(!other.is_admin);
    assert_ne!(admin.session_id, other.session_id, "every login gets its own session id");
}
