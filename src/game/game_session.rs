use super::scoring::score;
use super::secret_generator::generate_secret;
use crate::error::{ConfigError, SessionError};
use crate::model::{
    Difficulty, DifficultyConfig, GameRecord, Guess, GuessAttempt, HistoryVisibility, Outcome,
    SecretCode, SessionPhase, SessionSnapshot, TimerState,
};
use log::{debug, info, trace};
use rand::Rng;
use std::time::SystemTime;
use uuid::Uuid;

/// What an accepted guess did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResult {
    pub attempt: GuessAttempt,
    pub attempts_used: usize,
    pub won: bool,
    /// Set when this guess ended the session.
    pub outcome: Option<Outcome>,
}

/// One playthrough: `Configuring` until a secret exists, `Active` while
/// guesses are accepted, then `Over` for good.
#[derive(Debug, Clone)]
pub struct GameSession {
    difficulty: Difficulty,
    config: DifficultyConfig,
    secret: Option<SecretCode>,
    history: Vec<GuessAttempt>,
    phase: SessionPhase,
    has_revealed_secret: bool,
    has_seen_hint: bool,
    timer_state: TimerState,
    playthrough_id: Uuid,
}

impl GameSession {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            config: difficulty.config(),
            secret: None,
            history: Vec::new(),
            phase: SessionPhase::Configuring,
            has_revealed_secret: false,
            has_seen_hint: false,
            timer_state: TimerState::default(),
            playthrough_id: Uuid::new_v4(),
        }
    }

    /// An active session around a known secret.
    pub fn with_secret(difficulty: Difficulty, secret: SecretCode) -> Result<Self, ConfigError> {
        let mut session = Self::new(difficulty);
        session.activate(secret)?;
        Ok(session)
    }

    /// Throws away everything about the current playthrough and deals a new
    /// secret for `difficulty`. Legal from any phase.
    pub fn start_new_game<R: Rng + ?Sized>(
        &mut self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        *self = Self::new(difficulty);
        let secret = generate_secret(self.config.code_length, rng)?;
        self.activate(secret)
    }

    fn activate(&mut self, secret: SecretCode) -> Result<(), ConfigError> {
        if secret.len() != self.config.code_length {
            return Err(ConfigError::SecretLengthMismatch {
                expected: self.config.code_length,
                actual: secret.len(),
            });
        }
        self.secret = Some(secret);
        self.timer_state = TimerState::default();
        self.phase = SessionPhase::Active;
        info!(target: "game_session", "New {} game {}", self.difficulty, self.playthrough_id);
        Ok(())
    }

    /// Scores `raw` against the secret and records it. Invalid input or a
    /// session that is not active leaves every field as it was.
    pub fn submit_guess(&mut self, raw: &str) -> Result<SubmitResult, SessionError> {
        let secret = match (&self.phase, &self.secret) {
            (SessionPhase::Active, Some(secret)) => secret,
            _ => return Err(SessionError::NotActive),
        };
        let guess = Guess::parse(raw, self.config.code_length)?;
        let result = score(secret, &guess);
        trace!(target: "game_session", "Guess {} scored {:?}", guess, result);

        if self.config.history_visibility == HistoryVisibility::LatestOnly {
            self.history.iter_mut().for_each(GuessAttempt::hide_feedback);
        }
        let attempt = GuessAttempt::new(guess, result);
        self.history.push(attempt.clone());

        let won = result.is_solved(self.config.code_length);
        let outcome = if won {
            Some(Outcome::Won)
        } else if self.history.len() >= self.config.max_attempts {
            Some(Outcome::Lost)
        } else {
            None
        };
        if let Some(outcome) = outcome {
            self.finish(outcome);
        }

        Ok(SubmitResult {
            attempt,
            attempts_used: self.history.len(),
            won,
            outcome,
        })
    }

    /// Ends the session and reveals the secret. History is kept as is.
    pub fn give_up(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Active {
            return Err(SessionError::NotActive);
        }
        self.finish(Outcome::GaveUp);
        Ok(())
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = SessionPhase::Over(outcome);
        self.has_revealed_secret = true;
        self.timer_state = self.timer_state.ended(SystemTime::now());
        info!(
            target: "game_session",
            "Game {} over: {:?} after {} attempts",
            self.playthrough_id,
            outcome,
            self.history.len()
        );
    }

    /// Hints open up after the second guess. Easy keeps offering them,
    /// the other levels stop once one has been seen.
    pub fn hint_available(&self) -> bool {
        self.secret.is_some()
            && self.history.len() > 1
            && (self.difficulty.repeats_hints() || !self.has_seen_hint)
    }

    pub fn mark_hint_seen(&mut self) {
        debug!(target: "game_session", "Hint seen");
        self.has_seen_hint = true;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> DifficultyConfig {
        self.config
    }

    pub fn history(&self) -> &[GuessAttempt] {
        &self.history
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.phase.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    pub fn has_revealed_secret(&self) -> bool {
        self.has_revealed_secret
    }

    pub fn has_seen_hint(&self) -> bool {
        self.has_seen_hint
    }

    pub fn attempts_used(&self) -> usize {
        self.history.len()
    }

    pub fn attempts_remaining(&self) -> usize {
        self.config.max_attempts.saturating_sub(self.history.len())
    }

    /// The secret, regardless of whether the player may see it yet.
    pub fn secret(&self) -> Option<&SecretCode> {
        self.secret.as_ref()
    }

    pub fn revealed_secret(&self) -> Option<&SecretCode> {
        self.secret.as_ref().filter(|_| self.has_revealed_secret)
    }

    pub fn playthrough_id(&self) -> Uuid {
        self.playthrough_id
    }

    pub fn timer_state(&self) -> &TimerState {
        &self.timer_state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            difficulty: self.difficulty,
            code_length: self.config.code_length,
            max_attempts: self.config.max_attempts,
            phase: self.phase,
            history: self.history.clone(),
            attempts_used: self.attempts_used(),
            attempts_remaining: self.attempts_remaining(),
            revealed_secret: self.revealed_secret().cloned(),
            hint_available: self.hint_available(),
        }
    }

    /// Summary for a finished session; `None` while it is still running.
    pub fn game_record(&self) -> Option<GameRecord> {
        let outcome = self.outcome()?;
        Some(GameRecord {
            playthrough_id: self.playthrough_id,
            difficulty: self.difficulty,
            outcome,
            attempts: self.history.len(),
            completion_time: self.timer_state.elapsed(),
            timestamp: chrono::Utc::now().timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::tests::UsingLogger;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_context::test_context;

    fn session(difficulty: Difficulty, secret: &str) -> GameSession {
        GameSession::with_secret(difficulty, secret.parse().unwrap()).unwrap()
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_new_game_is_active_with_fresh_secret(_: &mut UsingLogger) {
        let mut session = GameSession::new(Difficulty::Hard);
        assert_eq!(session.phase(), SessionPhase::Configuring);
        assert_eq!(session.submit_guess("12345"), Err(SessionError::NotActive));

        session
            .start_new_game(Difficulty::Hard, &mut StdRng::seed_from_u64(11))
            .unwrap();

        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.secret().map(SecretCode::len), Some(5));
        assert!(session.history().is_empty());
        assert_eq!(session.revealed_secret(), None);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_winning_guess_reveals_secret(_: &mut UsingLogger) {
        let mut session = session(Difficulty::Easy, "5832");

        let first = session.submit_guess("1234").unwrap();
        assert_eq!(first.attempt.bulls(), Some(1));
        assert_eq!(first.attempt.cows(), Some(1));
        assert_eq!(first.outcome, None);

        let second = session.submit_guess("5821").unwrap();
        assert_eq!((second.attempt.bulls(), second.attempt.cows()), (Some(2), Some(1)));

        let last = session.submit_guess("5832").unwrap();
        assert!(last.won);
        assert_eq!(last.outcome, Some(Outcome::Won));
        assert_eq!(last.attempts_used, 3);
        assert!(session.is_over());
        assert!(session.has_revealed_secret());
        assert_eq!(session.revealed_secret().map(ToString::to_string), Some("5832".to_string()));
        assert!(!session.timer_state().is_running());
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_easy_loses_after_seven_misses(_: &mut UsingLogger) {
        let mut session = session(Difficulty::Easy, "5832");
        let misses = ["1234", "1235", "1236", "1237", "1238", "1239", "1230"];

        for (i, guess) in misses.iter().enumerate() {
            assert!(!session.is_over(), "over too early at {}", i);
            session.submit_guess(guess).unwrap();
        }

        assert_eq!(session.outcome(), Some(Outcome::Lost));
        assert!(session.has_revealed_secret());
        assert_eq!(session.attempts_remaining(), 0);
        assert_eq!(session.submit_guess("5832"), Err(SessionError::NotActive));
        assert_eq!(session.history().len(), 7);
    }

    #[test]
    fn test_duplicate_digits_not_recorded() {
        let mut session = session(Difficulty::Easy, "5832");
        session.submit_guess("1234").unwrap();
        let before = session.snapshot();

        assert_eq!(
            session.submit_guess("1123"),
            Err(SessionError::Validation(ValidationError::DuplicateDigits))
        );
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_short_guess_rejected_as_duplicate_digits() {
        let mut session = session(Difficulty::Easy, "5832");
        assert_eq!(
            session.submit_guess("123"),
            Err(SessionError::Validation(ValidationError::DuplicateDigits))
        );
        assert!(session.history().is_empty());
        assert_eq!(session.attempts_used(), 0);
    }

    #[test]
    fn test_overlong_guess_not_recorded() {
        let mut session = session(Difficulty::Easy, "5832");
        assert_eq!(
            session.submit_guess("12345"),
            Err(SessionError::Validation(ValidationError::WrongLength {
                expected: 4,
                actual: 5
            }))
        );
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_give_up_keeps_history() {
        let mut session = session(Difficulty::Hard, "58321");
        session.submit_guess("12345").unwrap();

        session.give_up().unwrap();

        assert_eq!(session.outcome(), Some(Outcome::GaveUp));
        assert!(session.has_revealed_secret());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].bulls(), Some(1));
        assert_eq!(session.give_up(), Err(SessionError::NotActive));
        assert_eq!(session.outcome(), Some(Outcome::GaveUp));
    }

    #[test]
    fn test_give_up_needs_active_session() {
        let mut session = GameSession::new(Difficulty::Easy);
        assert_eq!(session.give_up(), Err(SessionError::NotActive));
        assert!(!session.has_revealed_secret());
    }

    #[test]
    fn test_start_new_game_clears_everything() {
        let mut session = session(Difficulty::Hard, "58321");
        session.submit_guess("12345").unwrap();
        session.submit_guess("67890").unwrap();
        session.mark_hint_seen();
        session.give_up().unwrap();
        let old_id = session.playthrough_id();

        session
            .start_new_game(Difficulty::Easy, &mut StdRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(session.difficulty(), Difficulty::Easy);
        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(session.history().is_empty());
        assert!(!session.has_revealed_secret());
        assert!(!session.has_seen_hint());
        assert_ne!(session.playthrough_id(), old_id);
        assert_eq!(session.secret().map(SecretCode::len), Some(4));
    }

    #[test]
    fn test_secret_must_match_code_length() {
        let result = GameSession::with_secret(Difficulty::Hard, "5832".parse().unwrap());
        assert_eq!(
            result.err(),
            Some(ConfigError::SecretLengthMismatch {
                expected: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn test_nightmare_hides_all_but_latest() {
        let mut session = session(Difficulty::Nightmare, "58321");
        session.submit_guess("12345").unwrap();
        session.submit_guess("67890").unwrap();
        session.submit_guess("58324").unwrap();

        let visible: Vec<bool> = session
            .history()
            .iter()
            .map(|a| a.is_feedback_visible())
            .collect();
        assert_eq!(visible, vec![false, false, true]);
        assert_eq!(session.history()[2].bulls(), Some(4));
        assert_eq!(session.history()[2].cows(), Some(0));
    }

    #[test]
    fn test_hard_keeps_all_feedback() {
        let mut session = session(Difficulty::Hard, "58321");
        session.submit_guess("12345").unwrap();
        session.submit_guess("67890").unwrap();

        assert!(session.history().iter().all(|a| a.is_feedback_visible()));
    }

    #[test]
    fn test_game_record_only_when_over() {
        let mut session = session(Difficulty::Easy, "5832");
        assert!(session.game_record().is_none());
        session.submit_guess("5832").unwrap();

        let record = session.game_record().unwrap();
        assert_eq!(record.outcome, Outcome::Won);
        assert_eq!(record.attempts, 1);
        assert_eq!(record.playthrough_id, session.playthrough_id());
    }

    /// Up to 12 raw guesses drawn from distinct-digit five-digit strings.
    fn guesses() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(
            proptest::sample::subsequence((0u8..10).collect::<Vec<_>>(), 5)
                .prop_shuffle()
                .prop_map(|d| d.iter().map(|x| char::from(b'0' + x)).collect::<String>()),
            0..12,
        )
    }

    proptest! {
        #[test]
        fn prop_history_never_exceeds_budget(raws in guesses(), seed in any::<u64>()) {
            let mut session = GameSession::new(Difficulty::Hard);
            session.start_new_game(Difficulty::Hard, &mut StdRng::seed_from_u64(seed)).unwrap();
            for raw in &raws {
                let was_over = session.is_over();
                let result = session.submit_guess(raw);
                prop_assert_eq!(was_over, result == Err(SessionError::NotActive));
                prop_assert!(session.history().len() <= session.config().max_attempts);
            }
        }

        #[test]
        fn prop_nightmare_shows_only_last(raws in guesses(), seed in any::<u64>()) {
            let mut session = GameSession::new(Difficulty::Nightmare);
            session.start_new_game(Difficulty::Nightmare, &mut StdRng::seed_from_u64(seed)).unwrap();
            for raw in &raws {
                let _ = session.submit_guess(raw);
            }
            let history = session.history();
            if let Some((last, earlier)) = history.split_last() {
                prop_assert!(last.is_feedback_visible());
                prop_assert!(earlier.iter().all(|a| !a.is_feedback_visible()));
            }
        }
    }
}
