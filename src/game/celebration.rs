use std::time::{Duration, SystemTime};

pub const CELEBRATION_DURATION: Duration = Duration::from_secs(5);

/// Cosmetic win flag that switches itself off after `CELEBRATION_DURATION`.
/// Nothing in the game depends on it; late or repeated ticks are harmless.
#[derive(Debug, Clone, Default)]
pub struct Celebration {
    expires_at: Option<SystemTime>,
}

impl Celebration {
    pub fn start(&mut self, now: SystemTime) {
        self.expires_at = Some(now + CELEBRATION_DURATION);
    }

    pub fn is_active(&self) -> bool {
        self.expires_at.is_some()
    }

    /// Returns `true` exactly once, on the first tick at or past the deadline.
    pub fn expire_if_due(&mut self, now: SystemTime) -> bool {
        match self.expires_at {
            Some(deadline) if now >= deadline => {
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }
}
