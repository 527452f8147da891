//! Town action tests: investing, schools, taxes, savings.

use chrono::{TimeZone, Utc};
use financeville_core::{
    account,
    clock::FixedClock,
    config::GameConfig,
    engine::GameEngine,
    error::GameError,
    event::GameEvent,
    rng::ScriptedRng,
    store::GameStore,
};

fn build(picks: &[usize]) -> GameEngine {
    let store = GameStore::in_memory().expect("in-memory store");
    store.bootstrap().expect("bootstrap");
    let config = GameConfig::default();
    account::register(&store, &config, "mayor", "pw").expect("register");
    GameEngine::login(
        store,
        config,
        "mayor",
        "pw",
        Box::new(ScriptedRng::new(picks.iter().copied())),
        Box::new(FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 2, 8, 0, 0).unwrap())),
    )
    .expect("login")
}

#[test]
fn investing_applies_each_table_outcome() {
    let expected = [-200, -100, 0, 100, 200, 300, 500];
    let picks: Vec<usize> = (0..expected.len()).collect();
    let mut engine = build(&picks);

    let mut balance = 1000;
    for outcome in expected {
        let event = engine.invest_stocks().unwrap();
        balance += outcome;
        assert_eq!(event, GameEvent::StocksInvested { outcome });
        assert_eq!(engine.state().balance, balance);
    }
}

#[test]
fn losses_are_logged_as_losses() {
    let mut engine = build(&[0]);
    engine.invest_stocks().unwrap();
    let last = engine.event_log().last().expect("log line");
    assert_eq!(last.message, "Investment lost $200.");
}

#[test]
fn school_needs_three_hundred() {
    let mut engine = build(&[]);
    engine.deposit_to_savings("701").unwrap();
    assert_eq!(engine.state().balance, 299);

    let before = engine.state().persisted();
    let log_len = engine.event_log().len();
    let err = engine.build_school().unwrap_err();
    assert!(
        matches!(err, GameError::InsufficientFunds { required: 300, available: 299 }),
        "unexpected error: {err}"
    );
    assert_eq!(engine.state().persisted(), before, "failed build must not mutate state");
    assert_eq!(engine.event_log().len(), log_len, "failed build must not log");

    engine.withdraw_from_savings("1").unwrap();
    engine.build_school().unwrap();
    assert_eq!(engine.state().balance, 0);
    assert_eq!(engine.state().happiness, 60);
}

#[test]
fn tax_rate_is_additive_not_idempotent() {
    let mut engine = build(&[]);

    let first = engine.set_tax_rate(20).unwrap();
    assert_eq!(
        first,
        GameEvent::TaxesApplied { rate: 20, revenue: 200, happiness_change: -4 }
    );
    engine.set_tax_rate(20).unwrap();

    assert_eq!(engine.state().tax_rate, 20);
    assert_eq!(engine.state().balance, 1400, "revenue is collected on every call");
    assert_eq!(engine.state().happiness, 42, "the penalty is applied on every call");
}

#[test]
fn tax_penalty_rounds_toward_negative_infinity() {
    let mut engine = build(&[]);
    engine.set_tax_rate(7).unwrap();
    assert_eq!(engine.state().happiness, 48, "floor(-7 / 5) = -2");
    assert_eq!(engine.state().balance, 1070);
}

#[test]
fn tax_rate_outside_bounds_is_rejected() {
    let mut engine = build(&[]);
    for rate in [-1, 51, 100] {
        assert!(matches!(
            engine.set_tax_rate(rate),
            Err(GameError::InvalidTaxRate { .. })
        ));
    }
    assert_eq!(engine.state().tax_rate, 10);
    assert!(!engine.has_unsaved_changes());
}

#[test]
fn deposit_and_withdraw_conserve_money() {
    let mut engine = build(&[]);
    let total = engine.state().net_worth();

    for amount in ["1", "250", "749"] {
        let before = engine.state().persisted();
        engine.deposit_to_savings(amount).unwrap();
        let a: i64 = amount.parse().unwrap();
        assert_eq!(engine.state().balance, before.balance - a);
        assert_eq!(engine.state().savings, before.savings + a);
        assert_eq!(engine.state().net_worth(), total);
    }
    assert_eq!(engine.state().balance, 0);

    engine.withdraw_from_savings("600").unwrap();
    assert_eq!(engine.state().balance, 600);
    assert_eq!(engine.state().savings, 400);
    assert_eq!(engine.state().net_worth(), total);
}

#[test]
fn transfers_check_funds_and_parse_input() {
    let mut engine = build(&[]);

    assert!(matches!(
        engine.deposit_to_savings("1001"),
        Err(GameError::InsufficientBalance { required: 1001, available: 1000 })
    ));
    assert!(matches!(
        engine.withdraw_from_savings("1"),
        Err(GameError::InsufficientSavings { required: 1, available: 0 })
    ));
    for bad in ["abc", "", "12.5", "-5", "0"] {
        assert!(
            matches!(engine.deposit_to_savings(bad), Err(GameError::InvalidAmount { .. })),
            "{bad:?} should be an invalid amount"
        );
    }

    assert_eq!(engine.state().balance, 1000);
    assert_eq!(engine.state().savings, 0);
    assert!(!engine.has_unsaved_changes(), "rejected transfers leave nothing to save");
}

#[test]
fn withdraw_rejects_malformed_amounts_like_deposit() {
    let mut engine = build(&[]);
    engine.deposit_to_savings("500").unwrap();
    engine.save_game().unwrap();
    let before = engine.state().persisted();
    let log_len = engine.event_log().len();

    for bad in ["abc", "0", "", "-5", "7.5"] {
        assert!(
            matches!(engine.withdraw_from_savings(bad), Err(GameError::InvalidAmount { .. })),
            "{bad:?} should be an invalid amount"
        );
    }

    assert_eq!(engine.state().persisted(), before);
    assert_eq!(engine.state().savings, 500);
    assert_eq!(engine.event_log().len(), log_len, "rejections are not logged as events");
    assert!(!engine.has_unsaved_changes(), "rejected transfers leave nothing to save");
}

#[test]
fn unsaved_flag_tracks_changes_and_saves() {
    let mut engine = build(&[3]);
    assert!(!engine.has_unsaved_changes(), "a freshly loaded game is clean");

    engine.invest_stocks().unwrap();
    assert!(engine.has_unsaved_changes());

    engine.save_game().unwrap();
    assert!(!engine.has_unsaved_changes());
    assert_eq!(
        engine.store().load_state("mayor").unwrap(),
        Some(engine.state().persisted()),
        "save then load must round-trip every persisted field"
    );
}

#[test]
fn every_successful_action_appends_one_log_line() {
    let mut engine = build(&[4]);
    let start = engine.event_log().len();

    engine.invest_stocks().unwrap();
    engine.build_school().unwrap();
    engine.set_tax_rate(15).unwrap();
    engine.deposit_to_savings("10").unwrap();
    engine.withdraw_from_savings("10").unwrap();

    assert_eq!(engine.event_log().len(), start + 5);
    let names: Vec<&str> = engine.event_log()[start..]
        .iter()
        .map(|e| e.event.type_name())
        .collect();
    assert_eq!(
        names,
        ["stocks_invested", "school_built", "taxes_applied", "savings_deposited", "savings_withdrawn"]
    );
    assert!(engine.event_log()[start].render().starts_with("[08:00:00] "));
}
