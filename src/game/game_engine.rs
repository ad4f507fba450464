use log::{debug, error, info, trace, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::SystemTime;

use super::celebration::Celebration;
use super::game_session::GameSession;
use super::hint_provider::HintProvider;
use super::settings::Settings;
use super::stats_manager::StatsLedger;
use super::storage::KeyValueStore;
use crate::destroyable::Destroyable;
use crate::error::{ConfigError, GameError, SessionError};
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{
    Difficulty, GameEngineCommand, GameEngineEvent, Outcome, SessionSnapshot, StatsTable,
};

/// Owns the live session and everything around it: stats, hints, the
/// celebration flag and persisted settings. Commands come in on one channel,
/// state changes go out on another.
///
/// Listeners must not dispatch commands synchronously from inside an event
/// callback; the engine is mutably borrowed while it emits.
pub struct GameEngine {
    session: GameSession,
    ledger: StatsLedger,
    hints: HintProvider,
    celebration: Celebration,
    settings: Settings,
    store: Rc<dyn KeyValueStore>,
    rng: StdRng,
    debug_mode: bool,
    subscription: Option<Unsubscriber<GameEngineCommand>>,
    game_engine_event_emitter: EventEmitter<GameEngineEvent>,
}

impl Destroyable for GameEngine {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl GameEngine {
    /// Builds an engine listening on `game_engine_command_observer`.
    /// `seed` pins every random draw the engine makes.
    pub fn new(
        game_engine_command_observer: EventObserver<GameEngineCommand>,
        game_engine_event_emitter: EventEmitter<GameEngineEvent>,
        store: Rc<dyn KeyValueStore>,
        seed: Option<u64>,
    ) -> Result<Rc<RefCell<Self>>, GameError> {
        let engine = Self::detached(game_engine_event_emitter, store, seed)?;
        let refcell = Rc::new(RefCell::new(engine));
        GameEngine::wire_subscription(refcell.clone(), game_engine_command_observer);
        Ok(refcell)
    }

    /// An engine driven by direct `handle_command` calls.
    pub fn detached(
        game_engine_event_emitter: EventEmitter<GameEngineEvent>,
        store: Rc<dyn KeyValueStore>,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
        info!(target: "game_engine", "rng seed {}", seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let settings = Settings::load(store.as_ref());
        let mut session = GameSession::new(settings.difficulty);
        session.start_new_game(settings.difficulty, &mut rng)?;

        Ok(Self {
            session,
            ledger: StatsLedger::new(store.clone()),
            hints: HintProvider::default(),
            celebration: Celebration::default(),
            settings,
            store,
            rng,
            debug_mode: Settings::is_debug_mode(),
            subscription: None,
            game_engine_event_emitter,
        })
    }

    fn wire_subscription(
        engine: Rc<RefCell<Self>>,
        game_engine_command_observer: EventObserver<GameEngineCommand>,
    ) {
        let engine_handler = engine.clone();
        let subscription = game_engine_command_observer.subscribe(move |command| {
            let mut engine = engine_handler.borrow_mut();
            engine.handle_command(command.clone());
        });
        engine.borrow_mut().subscription = Some(subscription);
    }

    /// Announces the opening state: rules on first run, stats, then the
    /// session dealt at construction.
    pub fn start(&mut self) {
        if !Settings::rules_shown(self.store.as_ref()) {
            self.emit(GameEngineEvent::RulesDisclosureRequested);
            if let Err(e) = Settings::mark_rules_shown(self.store.as_ref()) {
                error!(target: "game_engine", "Could not persist rules flag: {}", e);
            }
        }
        self.emit(GameEngineEvent::StatsUpdated(self.ledger.load_stats()));
        self.announce_session();
    }

    pub fn handle_command(&mut self, command: GameEngineCommand) {
        trace!(target: "game_engine", "Handling command: {:?}", command);
        match command {
            GameEngineCommand::NewGame(difficulty) => self.new_game(difficulty),
            GameEngineCommand::ChangeDifficulty(difficulty) => self.new_game(Some(difficulty)),
            GameEngineCommand::SubmitGuess(raw) => self.submit_guess(&raw),
            GameEngineCommand::GiveUp => self.give_up(),
            GameEngineCommand::RequestHint => self.request_hint(),
            GameEngineCommand::CloseHint => self.close_hint(),
            GameEngineCommand::ShowRules => self.emit(GameEngineEvent::RulesDisclosureRequested),
            GameEngineCommand::RequestStats => {
                self.emit(GameEngineEvent::StatsUpdated(self.ledger.load_stats()))
            }
            GameEngineCommand::ResetStats => match self.ledger.reset() {
                Ok(table) => self.emit(GameEngineEvent::StatsUpdated(table)),
                Err(e) => error!(target: "game_engine", "Could not reset stats: {}", e),
            },
            GameEngineCommand::Tick(now) => self.tick(now),
        }
    }

    fn new_game(&mut self, difficulty: Option<Difficulty>) {
        let difficulty = difficulty.unwrap_or(self.session.difficulty());
        if difficulty != self.settings.difficulty {
            self.settings.difficulty = difficulty;
            if let Err(e) = self.settings.save(self.store.as_ref()) {
                error!(target: "game_engine", "Could not save settings: {}", e);
            }
        }

        if let Err(e) = self.session.start_new_game(difficulty, &mut self.rng) {
            // The difficulty table never asks for more than ten digits.
            error!(target: "game_engine", "Could not start {} game: {}", difficulty, e);
            return;
        }
        self.hints.reset();
        self.announce_session();
    }

    fn announce_session(&mut self) {
        if self.debug_mode {
            if let Some(secret) = self.session.secret() {
                debug!(
                    target: "game_engine",
                    "Secret for {}: {}",
                    self.session.playthrough_id(),
                    secret
                );
            }
        }
        self.emit(GameEngineEvent::SessionStarted(self.session.snapshot()));
        self.emit(GameEngineEvent::HintAvailabilityChanged(
            self.session.hint_available(),
        ));
    }

    fn submit_guess(&mut self, raw: &str) {
        let hint_was_available = self.session.hint_available();
        let result = match self.session.submit_guess(raw) {
            Ok(result) => result,
            Err(SessionError::Validation(e)) => {
                info!(target: "game_engine", "Rejected guess {:?}: {}", raw, e);
                self.emit(GameEngineEvent::GuessRejected(e));
                return;
            }
            Err(SessionError::NotActive) => {
                debug!(target: "game_engine", "Ignoring guess; session is not active");
                return;
            }
        };

        self.emit(GameEngineEvent::SessionUpdated(self.session.snapshot()));

        match self.ledger.record_outcome(
            self.session.difficulty(),
            result.attempts_used as u32,
            result.won,
        ) {
            Ok(table) => self.emit(GameEngineEvent::StatsUpdated(table)),
            Err(e) => error!(target: "game_engine", "Could not save stats: {}", e),
        }

        if let Some(outcome) = result.outcome {
            self.finish(outcome);
        }

        let hint_available = self.session.hint_available();
        if hint_available != hint_was_available {
            self.emit(GameEngineEvent::HintAvailabilityChanged(hint_available));
        }
    }

    fn give_up(&mut self) {
        match self.session.give_up() {
            Ok(()) => {
                self.emit(GameEngineEvent::SessionUpdated(self.session.snapshot()));
                self.finish(Outcome::GaveUp);
            }
            Err(e) => debug!(target: "game_engine", "Ignoring give up: {}", e),
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        if outcome == Outcome::Won {
            self.celebration.start(SystemTime::now());
            self.emit(GameEngineEvent::CelebrationChanged(true));
        }

        let secret = self.session.secret().cloned();
        let (Some(secret), Some(record)) = (secret, self.session.game_record()) else {
            warn!(target: "game_engine", "Session ended without a secret");
            return;
        };
        self.emit(GameEngineEvent::GameOver {
            outcome,
            secret,
            record,
        });
    }

    fn request_hint(&mut self) {
        match self.hints.request(&self.session, &mut self.rng) {
            Some(hint) => self.emit(GameEngineEvent::HintRevealed(hint)),
            None => debug!(target: "game_engine", "No hint on offer"),
        }
    }

    fn close_hint(&mut self) {
        if !self.hints.is_open() {
            return;
        }
        self.hints.close(&mut self.session);
        self.emit(GameEngineEvent::HintAvailabilityChanged(
            self.session.hint_available(),
        ));
    }

    fn tick(&mut self, now: SystemTime) {
        if self.celebration.expire_if_due(now) {
            self.emit(GameEngineEvent::CelebrationChanged(false));
        }
    }

    fn emit(&self, event: GameEngineEvent) {
        self.game_engine_event_emitter.emit(event);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn stats(&self) -> StatsTable {
        self.ledger.load_stats()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_active()
    }
}
