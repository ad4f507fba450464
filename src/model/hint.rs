use serde::{Deserialize, Serialize};
use std::fmt;

pub const HINT_PLACEHOLDER: char = '?';

/// A copy of the secret with every position masked except `index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintReveal {
    pub index: usize,
    pub digits: Vec<Option<u8>>,
}

impl HintReveal {
    pub fn revealed_digit(&self) -> Option<u8> {
        self.digits.get(self.index).copied().flatten()
    }
}

impl fmt::Display for HintReveal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.digits {
            match slot {
                Some(digit) => write!(f, "{}", digit)?,
                None => write!(f, "{}", HINT_PLACEHOLDER)?,
            }
        }
        Ok(())
    }
}
