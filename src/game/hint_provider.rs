use super::game_session::GameSession;
use crate::model::{HintReveal, SecretCode};
use log::debug;
use rand::Rng;

/// Masks every position of `secret` but one, picked uniformly in
/// `0..length`. Returns `None` when there is no position to pick.
pub fn reveal<R: Rng + ?Sized>(
    secret: &SecretCode,
    length: usize,
    rng: &mut R,
) -> Option<HintReveal> {
    if length == 0 {
        return None;
    }
    let index = rng.random_range(0..length);
    let digits = (0..length)
        .map(|i| if i == index { secret.digit_at(i) } else { None })
        .collect();
    Some(HintReveal { index, digits })
}

/// Tracks the hint dialog. While a hint is open repeated requests return the
/// same reveal; closing it marks the session's hint as seen.
#[derive(Debug, Default)]
pub struct HintProvider {
    open: Option<HintReveal>,
}

impl HintProvider {
    pub fn request<R: Rng + ?Sized>(
        &mut self,
        session: &GameSession,
        rng: &mut R,
    ) -> Option<HintReveal> {
        if let Some(open) = &self.open {
            return Some(open.clone());
        }
        if !session.hint_available() {
            debug!(target: "hint", "Hint requested but not offered");
            return None;
        }
        let secret = session.secret()?;
        let hint = reveal(secret, session.config().code_length, rng)?;
        debug!(target: "hint", "Revealing position {}", hint.index);
        self.open = Some(hint.clone());
        Some(hint)
    }

    pub fn close(&mut self, session: &mut GameSession) {
        if self.open.take().is_some() {
            session.mark_hint_seen();
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn reset(&mut self) {
        self.open = None;
    }
}
