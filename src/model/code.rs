use crate::error::ValidationError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn parse_digits(raw: &str) -> Result<Vec<u8>, ValidationError> {
    raw.chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or(ValidationError::NonDigit(c))
        })
        .collect()
}

/// Parses `raw` into digit values, rejecting anything that is not `0`-`9`
/// or repeats a digit. Length is left to the caller.
fn parse_distinct_digits(raw: &str) -> Result<Vec<u8>, ValidationError> {
    let digits = parse_digits(raw)?;
    if !digits.iter().all_unique() {
        return Err(ValidationError::DuplicateDigits);
    }
    Ok(digits)
}

fn write_digits(f: &mut fmt::Formatter<'_>, digits: &[u8]) -> fmt::Result {
    for digit in digits {
        write!(f, "{}", digit)?;
    }
    Ok(())
}

/// The hidden number for one session. Digits are pairwise distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecretCode {
    digits: Vec<u8>,
}

impl SecretCode {
    /// Callers guarantee distinct digits in 0..=9.
    pub(crate) fn from_digits(digits: Vec<u8>) -> Self {
        debug_assert!(digits.iter().all_unique());
        debug_assert!(digits.iter().all(|d| *d <= 9));
        Self { digits }
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn digit_at(&self, index: usize) -> Option<u8> {
        self.digits.get(index).copied()
    }
}

impl FromStr for SecretCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_distinct_digits(s).map(Self::from_digits)
    }
}

impl fmt::Display for SecretCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_digits(f, &self.digits)
    }
}

/// A validated guess: exactly `code_length` distinct digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guess {
    digits: Vec<u8>,
}

impl Guess {
    /// Anything short of `code_length` distinct digits, including a short
    /// entry, is `DuplicateDigits`. Only overlong input is `WrongLength`.
    pub fn parse(raw: &str, code_length: usize) -> Result<Self, ValidationError> {
        let digits = parse_digits(raw)?;
        if digits.len() > code_length {
            return Err(ValidationError::WrongLength {
                expected: code_length,
                actual: digits.len(),
            });
        }
        if digits.iter().unique().count() < code_length {
            return Err(ValidationError::DuplicateDigits);
        }
        Ok(Self { digits })
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_digits(f, &self.digits)
    }
}
