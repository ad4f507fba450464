use crate::events::EventHandler;
use crate::model::{GameEngineEvent, HintReveal, SessionSnapshot, StatsTable};

/// Latest state as seen through the event stream. The terminal front end
/// renders from this rather than poking at the engine.
#[derive(Debug, Default)]
pub struct SessionProjection {
    pub session: Option<SessionSnapshot>,
    pub stats: StatsTable,
    pub hint: Option<HintReveal>,
    pub hint_available: bool,
    pub celebrating: bool,
}

impl EventHandler<GameEngineEvent> for SessionProjection {
    fn handle_event(&mut self, event: &GameEngineEvent) {
        match event {
            GameEngineEvent::SessionStarted(snapshot) => {
                self.session = Some(snapshot.clone());
                self.hint = None;
                self.hint_available = snapshot.hint_available;
            }
            GameEngineEvent::SessionUpdated(snapshot) => {
                self.session = Some(snapshot.clone());
                self.hint_available = snapshot.hint_available;
            }
            GameEngineEvent::StatsUpdated(stats) => self.stats = stats.clone(),
            GameEngineEvent::HintRevealed(hint) => self.hint = Some(hint.clone()),
            GameEngineEvent::HintAvailabilityChanged(available) => {
                self.hint_available = *available;
                if !available {
                    self.hint = None;
                }
            }
            GameEngineEvent::CelebrationChanged(on) => self.celebrating = *on,
            GameEngineEvent::GuessRejected(_)
            | GameEngineEvent::GameOver { .. }
            | GameEngineEvent::RulesDisclosureRequested => {}
        }
    }
}
