use crate::error::ConfigError;
use crate::model::SecretCode;
use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of distinct symbols a code can draw from.
pub const DIGIT_SPACE: usize = 10;

/// Draws `length` distinct digits, every ordered arrangement equally likely.
///
/// A partial Fisher-Yates shuffle of `0..=9` keeps the cost flat even at
/// `length == 10`, where sampling-until-unique would crawl.
pub fn generate_secret<R: Rng + ?Sized>(
    length: usize,
    rng: &mut R,
) -> Result<SecretCode, ConfigError> {
    if length > DIGIT_SPACE {
        return Err(ConfigError::LengthExceedsDigitSpace { length });
    }

    let mut digits: Vec<u8> = (0..DIGIT_SPACE as u8).collect();
    let (chosen, _) = digits.partial_shuffle(rng, length);
    let secret = SecretCode::from_digits(chosen.to_vec());
    trace!(target: "secret_generator", "Generated {}-digit secret", secret.len());
    Ok(secret)
}
