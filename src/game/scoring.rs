use crate::model::{Guess, SecretCode, Score};

fn digit_mask(digits: &[u8]) -> u16 {
    digits.iter().fold(0, |mask, d| mask | (1u16 << d))
}

/// Counts bulls (right digit, right place) and cows (right digit, wrong
/// place). Both operands are assumed to hold distinct digits and to have
/// the same length; `Guess::parse` enforces that before a guess gets here.
pub fn score(secret: &SecretCode, guess: &Guess) -> Score {
    debug_assert_eq!(secret.len(), guess.len());
    let present = digit_mask(secret.digits());

    guess
        .digits()
        .iter()
        .zip(secret.digits())
        .fold(Score::default(), |mut score, (g, s)| {
            if g == s {
                score.bulls += 1;
            } else if present & (1u16 << g) != 0 {
                score.cows += 1;
            }
            score
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::sample::subsequence;

    fn scored(secret: &str, guess: &str) -> Score {
        let secret: SecretCode = secret.parse().unwrap();
        let guess = Guess::parse(guess, secret.len()).unwrap();
        score(&secret, &guess)
    }

    #[test]
    fn test_one_bull_one_cow() {
        assert_eq!(scored("5832", "1234"), Score::new(1, 1));
    }

    #[test]
    fn test_two_bulls_one_cow() {
        assert_eq!(scored("5832", "5821"), Score::new(2, 1));
    }

    #[test]
    fn test_exact_match() {
        let score = scored("5832", "5832");
        assert_eq!(score, Score::new(4, 0));
        assert!(score.is_solved(4));
    }

    #[test]
    fn test_all_cows() {
        assert_eq!(scored("1234", "4321"), Score::new(0, 4));
    }

    #[test]
    fn test_nothing_in_common() {
        assert_eq!(scored("01234", "56789"), Score::new(0, 0));
    }

    /// Distinct-digit codes of `len` digits in a random order.
    fn code(len: usize) -> impl Strategy<Value = Vec<u8>> {
        subsequence((0u8..10).collect::<Vec<_>>(), len).prop_shuffle()
    }

    fn as_string(digits: &[u8]) -> String {
        digits.iter().map(|d| char::from(b'0' + d)).collect()
    }

    proptest! {
        #[test]
        fn prop_tally_bounded_by_length(
            (secret, guess) in (1usize..=10).prop_flat_map(|len| (code(len), code(len)))
        ) {
            let result = scored(&as_string(&secret), &as_string(&guess));
            prop_assert!(result.bulls + result.cows <= secret.len());
        }

        #[test]
        fn prop_solved_iff_equal(
            (secret, guess) in (4usize..=5).prop_flat_map(|len| (code(len), code(len)))
        ) {
            let result = scored(&as_string(&secret), &as_string(&guess));
            prop_assert_eq!(result.bulls == secret.len(), secret == guess);
        }

        #[test]
        fn prop_scoring_is_pure(secret in code(4), guess in code(4)) {
            let first = scored(&as_string(&secret), &as_string(&guess));
            let second = scored(&as_string(&secret), &as_string(&guess));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_rearranged_secret_is_all_bulls_and_cows(
            (secret, shuffled) in code(5).prop_flat_map(|s| (Just(s.clone()), Just(s).prop_shuffle()))
        ) {
            let result = scored(&as_string(&secret), &as_string(&shuffled));
            prop_assert_eq!(result.bulls + result.cows, 5);
        }
    }
}
