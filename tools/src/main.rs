//! town-runner: headless driver for FinanceVille.
//!
//! Usage:
//!   town-runner --user alice --password pw1 --register
//!   town-runner --user alice --password pw1 --db financeville.db --ipc-mode
//!   town-runner --user admin --password secret --seed 42 --config data/game.json
//!
//! In IPC mode each stdin line is one JSON request, each stdout line one JSON reply:
//!   {"type":"get_state"}
//!   {"type":"command","command":{"cmd":"deposit","amount":"400"}}
//!   {"type":"quit"}

use anyhow::Result;
use financeville_core::{
    account,
    clock::{GameClock, SystemClock},
    command::PlayerCommand,
    config::GameConfig,
    engine::GameEngine,
    error::GameError,
    rng::{GameRng, RandomSource},
    snapshot::StateSnapshot,
    store::GameStore,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    Command { command: PlayerCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct IpcReply<'a, T: serde::Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    ok: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    state: &'a StateSnapshot,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = string_arg(&args, "--db").unwrap_or("financeville.db");
    let user = string_arg(&args, "--user");
    let password = string_arg(&args, "--password");
    let export_dir = string_arg(&args, "--export-dir").unwrap_or(".");
    let seed: Option<u64> = string_arg(&args, "--seed").and_then(|s| s.parse().ok());
    let register = args.iter().any(|a| a == "--register");
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let config = match string_arg(&args, "--config") {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let (Some(user), Some(password)) = (user, password) else {
        anyhow::bail!("--user and --password are required");
    };

    if !ipc_mode {
        println!("FinanceVille: town-runner");
        println!("  db:        {db}");
        println!("  user:      {user}");
        println!("  seed:      {}", seed.map_or("entropy".to_string(), |s| s.to_string()));
        println!();
    }

    let store = GameStore::open(db)?;
    store.bootstrap()?;

    if register {
        match account::register(&store, &config, user, password) {
            Ok(()) => log::info!("registered '{user}'"),
            Err(GameError::DuplicateUser { .. }) if ipc_mode => {
                log::info!("'{user}' already registered, logging in");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let rng: Box<dyn RandomSource> = match seed {
        Some(s) => Box::new(GameRng::seeded(s)),
        None => Box::new(GameRng::from_entropy()),
    };
    let clock: Box<dyn GameClock> = Box::new(SystemClock);
    let mut engine = GameEngine::login(store, config, user, password, rng, clock)?;

    if ipc_mode {
        run_ipc_loop(&mut engine, export_dir)?;
    } else {
        print_summary(&engine);
    }

    engine.close()?;
    Ok(())
}

fn run_ipc_loop(engine: &mut GameEngine, export_dir: &str) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match request {
            IpcRequest::Quit => break,
            IpcRequest::GetState => {
                let state = engine.snapshot();
                let reply: IpcReply<'_, ()> = IpcReply { ok: None, error: None, state: &state };
                writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
            }
            IpcRequest::Command { command } => {
                let command = with_default_export_dir(command, export_dir);
                let result = engine.apply(command);
                let state = engine.snapshot();
                let line = match result {
                    Ok(outcome) => serde_json::to_string(&IpcReply {
                        ok: Some(outcome),
                        error: None,
                        state: &state,
                    })?,
                    // Rule errors are the player's notice; the session goes on.
                    Err(e) if e.is_rule_violation() => serde_json::to_string(&IpcReply::<()> {
                        ok: None,
                        error: Some(e.to_string()),
                        state: &state,
                    })?,
                    Err(e) => return Err(e.into()),
                };
                writeln!(stdout, "{line}")?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

/// An export with an empty dir goes to the runner's --export-dir.
fn with_default_export_dir(command: PlayerCommand, export_dir: &str) -> PlayerCommand {
    match command {
        PlayerCommand::ExportReport { dir } if dir.is_empty() => PlayerCommand::ExportReport {
            dir: export_dir.to_string(),
        },
        other => other,
    }
}

fn print_summary(engine: &GameEngine) {
    let session = engine.session();
    println!("=== TOWN SUMMARY ===");
    println!("  user:      {}{}", session.username, if session.is_admin { " (admin)" } else { "" });
    for line in engine.stats_text().lines() {
        println!("  {line}");
    }
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
