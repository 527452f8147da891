//! Command-object tests: JSON commands applied through GameEngine::apply.

use chrono::{TimeZone, Utc};
use financeville_core::{
    account,
    achievement::Achievement,
    clock::FixedClock,
    command::{Outcome, PlayerCommand},
    config::GameConfig,
    engine::GameEngine,
    error::GameError,
    event::GameEvent,
    prompt::NewQuestion,
    rng::ScriptedRng,
    store::GameStore,
};

fn build_as(username: &str, picks: &[usize]) -> GameEngine {
    let store = GameStore::in_memory().expect("in-memory store");
    store.bootstrap().expect("bootstrap");
    let config = GameConfig::default();
    account::register(&store, &config, username, "pw").expect("register");
    GameEngine::login(
        store,
        config,
        username,
        "pw",
        Box::new(ScriptedRng::new(picks.iter().copied())),
        Box::new(FixedClock::new(Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap())),
    )
    .expect("login")
}

fn parse(json: &str) -> PlayerCommand {
    serde_json::from_str(json).unwrap_or_else(|e| panic!("bad command {json}: {e}"))
}

#[test]
fn commands_parse_from_tagged_json() {
    assert_eq!(parse(r#"{"cmd":"invest_stocks"}"#), PlayerCommand::InvestStocks);
    assert_eq!(
        parse(r#"{"cmd":"set_tax_rate","rate":15}"#),
        PlayerCommand::SetTaxRate { rate: 15 }
    );
    assert_eq!(
        parse(r#"{"cmd":"deposit","amount":"400"}"#),
        PlayerCommand::Deposit { amount: "400".into() }
    );
    assert_eq!(
        parse(r#"{"cmd":"add_question","question":{"question":"Q?","options":["a","b","c","d"],"correct_option":2}}"#),
        PlayerCommand::AddQuestion { question: NewQuestion::new("Q?", ["a", "b", "c", "d"], 2) }
    );
}

#[test]
fn apply_reports_outcome_and_new_achievements() {
    let mut engine = build_as("mayor", &[]);

    let result = engine.apply(PlayerCommand::SetTaxRate { rate: 0 }).unwrap();
    assert_eq!(
        result.outcome,
        Outcome::Applied {
            event: GameEvent::TaxesApplied { rate: 0, revenue: 0, happiness_change: 0 }
        }
    );
    assert_eq!(result.unlocked, vec![Achievement::TaxFreeEconomy]);

    let again = engine.apply(PlayerCommand::SetTaxRate { rate: 0 }).unwrap();
    assert!(again.unlocked.is_empty());
}

#[test]
fn apply_runs_a_full_quiz_round() {
    let mut engine = build_as("mayor", &[0]);
    let started = engine.apply(PlayerCommand::StartQuiz).unwrap();
    match &started.outcome {
        Outcome::PromptStarted { prompt } => {
            assert_eq!(prompt.kind, "quiz");
            assert_eq!(Some(prompt), engine.snapshot().pending_prompt.as_ref());
        }
        other => panic!("expected a prompt, got {other:?}"),
    }
    let wire = serde_json::to_value(&started).unwrap();
    assert_eq!(wire["outcome"]["result"], "prompt_started");
    assert!(
        wire["outcome"]["prompt"].get("correct_option").is_none(),
        "a started prompt must not reveal its answer: {wire}"
    );

    let answered = engine.apply(PlayerCommand::AnswerQuiz { option: 1 }).unwrap();
    match answered.outcome {
        Outcome::Answered { answer } => assert!(answer.correct),
        other => panic!("expected an answer, got {other:?}"),
    }
    assert_eq!(engine.state().balance, 1150);
}

#[test]
fn apply_transfers_and_save() {
    let mut engine = build_as("mayor", &[]);
    let dep = engine.apply(PlayerCommand::Deposit { amount: "400".into() }).unwrap();
    assert_eq!(
        dep.outcome,
        Outcome::Applied { event: GameEvent::SavingsDeposited { amount: 400 } }
    );
    let wd = engine.apply(PlayerCommand::Withdraw { amount: "100".into() }).unwrap();
    assert_eq!(
        wd.outcome,
        Outcome::Applied { event: GameEvent::SavingsWithdrawn { amount: 100 } }
    );

    assert!(engine.has_unsaved_changes());
    assert_eq!(engine.apply(PlayerCommand::SaveGame).unwrap().outcome, Outcome::Saved);
    assert!(!engine.has_unsaved_changes());
    assert_eq!(engine.store().load_state("mayor").unwrap().unwrap().savings, 300);
}

#[test]
fn apply_surfaces_rule_errors_without_mutation() {
    let mut engine = build_as("mayor", &[]);
    let err = engine
        .apply(PlayerCommand::Deposit { amount: "lots".into() })
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidAmount { .. }));
    assert!(err.is_rule_violation());
    assert_eq!(engine.state().balance, 1000);
}

#[test]
fn admin_commands_manage_questions() {
    let mut engine = build_as("admin", &[]);
    let added = engine
        .apply(PlayerCommand::AddQuestion {
            question: NewQuestion::new("What is interest?", ["A fee for borrowing", "A tax", "A gift", "A fine"], 1),
        })
        .unwrap();
    let id = match added.outcome {
        Outcome::QuestionAdded { id } => id,
        other => panic!("expected QuestionAdded, got {other:?}"),
    };

    match engine.apply(PlayerCommand::ListQuestions).unwrap().outcome {
        Outcome::Questions { questions } => assert_eq!(questions.len(), 2),
        other => panic!("expected questions, got {other:?}"),
    }

    assert_eq!(
        engine.apply(PlayerCommand::DeleteQuestion { id }).unwrap().outcome,
        Outcome::QuestionDeleted { id, existed: true }
    );
    assert_eq!(
        engine.apply(PlayerCommand::DeleteQuestion { id }).unwrap().outcome,
        Outcome::QuestionDeleted { id, existed: false }
    );
}

#[test]
fn snapshot_reflects_pending_prompt_and_recent_log() {
    let mut engine = build_as("mayor", &[0]);
    engine.apply(PlayerCommand::StartChallenge).unwrap();

    let snap = engine.snapshot();
    assert_eq!(snap.username, "mayor");
    assert!(!snap.is_admin);
    let pending = snap.pending_prompt.expect("pending challenge");
    assert_eq!(pending.kind, "challenge");
    assert_eq!(pending.options.len(), 4);
    assert_eq!(snap.recent_log.len(), 1, "only the session start so far");

    for _ in 0..15 {
        engine.apply(PlayerCommand::SetTaxRate { rate: 10 }).unwrap();
    }
    assert_eq!(engine.snapshot().recent_log.len(), 10);
    assert!(engine.snapshot().unsaved_changes);
}
