//! The game state engine: the heart of FinanceVille.
//!
//! One engine per authenticated session. It owns the session's state,
//! the store connection, the random source and the clock.
//!
//! RULES:
//!   - A failed operation leaves state, log and the unsaved flag untouched.
//!   - Every successful state change appends one line to the event log,
//!     then checks achievements (each unlock logs its own line).
//!   - All randomness flows through the engine's RandomSource.
//!   - Only save_game writes the state back to the store.

use crate::{
    account::{self, Session},
    achievement::{self, Achievement},
    clock::GameClock,
    command::{CommandOutcome, Outcome, PlayerCommand},
    config::GameConfig,
    error::{GameError, GameResult},
    event::{GameEvent, LogEntry},
    prompt::{daily_challenges, DailyChallenge, NewQuestion, Prompt, QuizQuestion},
    report,
    rng::{self, RandomSource},
    rules::{self, AnswerResult},
    snapshot::{PendingPromptView, StateSnapshot, RECENT_LOG_LINES},
    state::GameState,
    store::GameStore,
    types::{OptionNumber, QuestionId},
};
use std::path::{Path, PathBuf};

pub struct GameEngine {
    session:    Session,
    state:      GameState,
    config:     GameConfig,
    store:      GameStore,
    rng:        Box<dyn RandomSource>,
    clock:      Box<dyn GameClock>,
    challenges: Vec<DailyChallenge>,
    pending:    Option<Prompt>,
    unsaved:    bool,
}

impl GameEngine {
    /// Load the session user's saved state and start playing.
    pub fn start(
        session: Session,
        store:   GameStore,
        config:  GameConfig,
        rng:     Box<dyn RandomSource>,
        clock:   Box<dyn GameClock>,
    ) -> GameResult<Self> {
        let persisted = store
            .load_state(&session.username)?
            .ok_or_else(|| GameError::UserNotFound {
                username: session.username.clone(),
            })?;
        let mut engine = Self {
            state: GameState::from_persisted(persisted),
            challenges: daily_challenges(),
            pending: None,
            unsaved: false,
            session,
            store,
            config,
            rng,
            clock,
        };
        let username = engine.session.username.clone();
        engine.log(GameEvent::SessionStarted { username });
        log::info!(
            "engine: session {} started for '{}'",
            engine.session.session_id,
            engine.session.username
        );
        Ok(engine)
    }

    /// Log in and start a session in one step.
    pub fn login(
        store:    GameStore,
        config:   GameConfig,
        username: &str,
        password: &str,
        rng:      Box<dyn RandomSource>,
        clock:    Box<dyn GameClock>,
    ) -> GameResult<Self> {
        let session = account::login(&store, &config, username, password, clock.now())?;
        Self::start(session, store, config, rng, clock)
    }

    /// End the session and release the store. Unsaved changes are dropped.
    pub fn close(self) -> GameResult<()> {
        if self.unsaved {
            log::warn!(
                "engine: session {} closed with unsaved changes",
                self.session.session_id
            );
        }
        log::info!("engine: session {} closed", self.session.session_id);
        drop(self.store);
        Ok(())
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn event_log(&self) -> &[LogEntry] {
        &self.state.event_log
    }

    pub fn pending_prompt(&self) -> Option<&Prompt> {
        self.pending.as_ref()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Replace the built-in daily challenges.
    pub fn set_challenges(&mut self, challenges: Vec<DailyChallenge>) {
        self.challenges = challenges;
    }

    // ── Town actions ───────────────────────────────────────────

    pub fn invest_stocks(&mut self) -> GameResult<GameEvent> {
        let outcome = *rng::choose(&mut *self.rng, &self.config.stock_outcomes)
            .ok_or_else(|| anyhow::anyhow!("stock outcome table is empty"))?;
        let event = rules::invest(&mut self.state, outcome);
        Ok(self.finish(event))
    }

    pub fn build_school(&mut self) -> GameResult<GameEvent> {
        let event = rules::build_school(&mut self.state, &self.config)
            .inspect_err(|e| log::warn!("engine: build_school rejected: {e}"))?;
        Ok(self.finish(event))
    }

    pub fn set_tax_rate(&mut self, rate: i64) -> GameResult<GameEvent> {
        let event = rules::set_tax_rate(&mut self.state, rate, &self.config)
            .inspect_err(|e| log::warn!("engine: set_tax_rate rejected: {e}"))?;
        Ok(self.finish(event))
    }

    pub fn deposit_to_savings(&mut self, amount: &str) -> GameResult<GameEvent> {
        let event = rules::deposit(&mut self.state, amount)
            .inspect_err(|e| log::warn!("engine: deposit rejected: {e}"))?;
        Ok(self.finish(event))
    }

    pub fn withdraw_from_savings(&mut self, amount: &str) -> GameResult<GameEvent> {
        let event = rules::withdraw(&mut self.state, amount)
            .inspect_err(|e| log::warn!("engine: withdraw rejected: {e}"))?;
        Ok(self.finish(event))
    }

    // ── Prompts ────────────────────────────────────────────────

    /// Draw a stored question uniformly and hold it until answered.
    pub fn start_quiz(&mut self) -> GameResult<Prompt> {
        let count = self.store.question_count()?;
        if count == 0 {
            return Err(GameError::NoQuizAvailable);
        }
        let offset = self.rng.pick(count as usize) as i64;
        let question = self
            .store
            .question_at(offset)?
            .ok_or(GameError::NoQuizAvailable)?;
        log::debug!("engine: quiz question {} drawn", question.id);
        let prompt = Prompt::Quiz(question);
        self.pending = Some(prompt.clone());
        Ok(prompt)
    }

    pub fn answer_quiz(&mut self, option: OptionNumber) -> GameResult<AnswerResult> {
        self.answer_pending("quiz", option)
    }

    /// Draw one of the daily challenges uniformly and hold it until answered.
    pub fn start_challenge(&mut self) -> GameResult<Prompt> {
        let challenge = rng::choose(&mut *self.rng, &self.challenges)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no daily challenges configured"))?;
        let prompt = Prompt::Challenge(challenge);
        self.pending = Some(prompt.clone());
        Ok(prompt)
    }

    pub fn answer_challenge(&mut self, option: OptionNumber) -> GameResult<AnswerResult> {
        self.answer_pending("challenge", option)
    }

    fn answer_pending(&mut self, kind: &'static str, option: OptionNumber) -> GameResult<AnswerResult> {
        let prompt = match &self.pending {
            Some(p) if p.kind() == kind => p.clone(),
            _ => return Err(GameError::NoPendingPrompt { kind }),
        };
        // An out-of-range option keeps the prompt pending.
        let (result, event) = rules::answer(&mut self.state, &prompt, option, &self.config)?;
        self.pending = None;
        self.finish(event);
        Ok(result)
    }

    // ── Achievements ───────────────────────────────────────────

    /// Unlock any achievement whose threshold now holds. Each fires once per session.
    pub fn check_achievements(&mut self) -> Vec<Achievement> {
        let unlocked = achievement::check_achievements(&mut self.state, &self.config.achievements);
        for a in &unlocked {
            log::info!("engine: '{}' unlocked {a}", self.session.username);
            self.log(GameEvent::AchievementUnlocked { achievement: *a });
        }
        unlocked
    }

    // ── Persistence and reports ────────────────────────────────

    pub fn save_game(&mut self) -> GameResult<()> {
        self.store
            .save_state(&self.session.username, &self.state.persisted())?;
        self.unsaved = false;
        self.log(GameEvent::GameSaved);
        log::info!("engine: saved game for '{}'", self.session.username);
        Ok(())
    }

    /// The export text for the current state, stamped with the clock's time.
    pub fn report(&self) -> String {
        report::render_report(&self.session.username, &self.state, self.clock.now())
    }

    /// Write the report to `<dir>/<prefix><username>.txt`, replacing any earlier one.
    pub fn export_report(&mut self, dir: &Path) -> GameResult<PathBuf> {
        let name = report::report_file_name(&self.config.report_prefix, &self.session.username);
        let path = report::write_report(dir, &name, &self.report())?;
        self.log(GameEvent::ReportExported {
            path: path.display().to_string(),
        });
        log::info!("engine: report exported to {}", path.display());
        Ok(path)
    }

    /// The stats panel text.
    pub fn stats_text(&self) -> String {
        let achievements = if self.state.achievements.is_empty() {
            "None".to_string()
        } else {
            self.state
                .achievements
                .iter()
                .map(|a| a.label())
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "Balance: ${}\nSavings: ${}\nHappiness: {}%\nTax Rate: {}%\nAchievements: {achievements}",
            self.state.balance, self.state.savings, self.state.happiness, self.state.tax_rate
        )
    }

    pub fn snapshot(&self) -> StateSnapshot {
        let entries = &self.state.event_log;
        let recent_start = entries.len().saturating_sub(RECENT_LOG_LINES);
        StateSnapshot {
            username: self.session.username.clone(),
            is_admin: self.session.is_admin,
            balance: self.state.balance,
            savings: self.state.savings,
            happiness: self.state.happiness,
            tax_rate: self.state.tax_rate,
            achievements: self.state.achievements.clone(),
            unsaved_changes: self.unsaved,
            pending_prompt: self.pending.as_ref().map(PendingPromptView::from),
            recent_log: entries[recent_start..].to_vec(),
        }
    }

    // ── Admin: quiz questions ──────────────────────────────────

    fn require_admin(&self) -> GameResult<()> {
        if !self.session.is_admin {
            log::warn!(
                "engine: '{}' attempted an admin operation",
                self.session.username
            );
            return Err(GameError::AdminRequired);
        }
        Ok(())
    }

    pub fn list_questions(&self) -> GameResult<Vec<QuizQuestion>> {
        self.require_admin()?;
        self.store.list_questions()
    }

    pub fn add_question(&mut self, question: &NewQuestion) -> GameResult<QuestionId> {
        self.require_admin()?;
        question.validate()?;
        let id = self.store.insert_question(question)?;
        log::info!("engine: admin added quiz question {id}");
        Ok(id)
    }

    /// Deleting an id that does not exist is a no-op. Returns whether a question was removed.
    pub fn delete_question(&mut self, id: QuestionId) -> GameResult<bool> {
        self.require_admin()?;
        let existed = self.store.delete_question(id)?;
        if existed {
            log::info!("engine: admin deleted quiz question {id}");
        } else {
            log::debug!("engine: delete of missing quiz question {id} ignored");
        }
        if matches!(&self.pending, Some(Prompt::Quiz(q)) if q.id == id) {
            self.pending = None;
        }
        Ok(existed)
    }

    // ── Commands ───────────────────────────────────────────────

    /// Run one command object against the session.
    pub fn apply(&mut self, command: PlayerCommand) -> GameResult<CommandOutcome> {
        let before = self.state.achievements.len();
        let outcome = match command {
            PlayerCommand::InvestStocks => Outcome::Applied {
                event: self.invest_stocks()?,
            },
            PlayerCommand::BuildSchool => Outcome::Applied {
                event: self.build_school()?,
            },
            PlayerCommand::SetTaxRate { rate } => Outcome::Applied {
                event: self.set_tax_rate(rate)?,
            },
            PlayerCommand::StartQuiz => Outcome::PromptStarted {
                prompt: PendingPromptView::from(&self.start_quiz()?),
            },
            PlayerCommand::AnswerQuiz { option } => Outcome::Answered {
                answer: self.answer_quiz(option)?,
            },
            PlayerCommand::StartChallenge => Outcome::PromptStarted {
                prompt: PendingPromptView::from(&self.start_challenge()?),
            },
            PlayerCommand::AnswerChallenge { option } => Outcome::Answered {
                answer: self.answer_challenge(option)?,
            },
            PlayerCommand::Deposit { amount } => Outcome::Applied {
                event: self.deposit_to_savings(&amount)?,
            },
            PlayerCommand::Withdraw { amount } => Outcome::Applied {
                event: self.withdraw_from_savings(&amount)?,
            },
            PlayerCommand::SaveGame => {
                self.save_game()?;
                Outcome::Saved
            }
            PlayerCommand::ExportReport { dir } => Outcome::Exported {
                path: self.export_report(Path::new(&dir))?.display().to_string(),
            },
            PlayerCommand::ListQuestions => Outcome::Questions {
                questions: self.list_questions()?,
            },
            PlayerCommand::AddQuestion { question } => Outcome::QuestionAdded {
                id: self.add_question(&question)?,
            },
            PlayerCommand::DeleteQuestion { id } => Outcome::QuestionDeleted {
                id,
                existed: self.delete_question(id)?,
            },
        };
        let unlocked = self.state.achievements[before..].to_vec();
        Ok(CommandOutcome { outcome, unlocked })
    }

    // ── Internals ──────────────────────────────────────────────

    fn log(&mut self, event: GameEvent) {
        let entry = LogEntry::new(self.clock.now(), event);
        log::debug!("engine: {} {}", entry.event.type_name(), entry.message);
        self.state.event_log.push(entry);
    }

    /// Record a successful state change.
    fn finish(&mut self, event: GameEvent) -> GameEvent {
        self.unsaved = true;
        self.log(event.clone());
        self.check_achievements();
        event
    }
}
