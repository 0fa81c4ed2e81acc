//! Utilities for generating passwords.

use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

use crate::PoolSelection;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("no character pools were selected; select at least one of uppercase, lowercase, numbers, or symbols")]
    NoPoolsSelected,
    #[error("password length must be a whole number greater than 0 (got {0:?})")]
    InvalidLength(String),
    #[error(
        "a password of length {length} cannot hold one character from each of the {pools} \
         selected pools"
    )]
    LengthBelowPoolCount { length: usize, pools: usize },
}

/// Generate a password of exactly `length` characters drawn from the selected pools.
///
/// Every selected pool contributes at least one character; the rest are sampled from the union of
/// the selected pools, and the whole thing is then shuffled so the guaranteed characters don't sit
/// at the front.
///
/// Note that `rand`'s underlying uniform sampler does the right thing to prevent bias: if it can't
/// generate a value that is within the given range (or really, a multiple of the range), it
/// re-samples. The same goes for the shuffle, which is a Fisher–Yates over that sampler.
pub fn generate_password<R>(
    rng: &mut R,
    selection: &PoolSelection,
    length: usize,
) -> Result<crate::Secret, GenerationError>
where
    R: Rng + CryptoRng,
{
    if selection.is_empty() {
        return Err(GenerationError::NoPoolsSelected);
    }
    if length == 0 {
        return Err(GenerationError::InvalidLength(length.to_string()));
    }
    let pool_count = selection.count();
    if length < pool_count {
        return Err(GenerationError::LengthBelowPoolCount {
            length,
            pools: pool_count,
        });
    }

    let mut chars = Vec::with_capacity(length);
    for pool in selection.pools() {
        let pool_chars = pool.characters().chars().collect::<Vec<_>>();
        chars.push(pick(rng, &pool_chars));
    }

    let union = selection.union();
    while chars.len() < length {
        chars.push(pick(rng, &union));
    }

    shuffle(rng, &mut chars);

    let secret = crate::Secret(chars.iter().collect());
    // `chars` holds the same characters as the secret; don't leave them lying around.
    zeroize::Zeroize::zeroize(&mut chars);
    Ok(secret)
}

/// Parse a user-supplied password length.
///
/// Rejects anything that isn't a positive base-10 integer, after trimming surrounding whitespace.
pub fn parse_length(raw: &str) -> Result<usize, GenerationError> {
    match raw.trim().parse::<usize>() {
        Ok(length) if length > 0 => Ok(length),
        _ => Err(GenerationError::InvalidLength(raw.trim().to_owned())),
    }
}

/// Upper bound on the entropy, in bits, of a password of `length` characters drawn uniformly from
/// the union of the selected pools.
pub fn entropy_bits(selection: &PoolSelection, length: usize) -> f64 {
    let alphabet = selection.union().len();
    if alphabet == 0 || length == 0 {
        return 0.0;
    }
    length as f64 * (alphabet as f64).log2()
}

/// Uniformly pick one character. `alphabet` must not be empty.
fn pick<R: Rng + ?Sized>(rng: &mut R, alphabet: &[char]) -> char {
    alphabet[rng.gen_range(0..alphabet.len())]
}

fn shuffle<R: Rng + ?Sized>(rng: &mut R, chars: &mut [char]) {
    chars.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::CharacterPool;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn chi_squared(counts: impl Iterator<Item = usize>, expected: f64) -> f64 {
        counts
            .map(|observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    fn every_selection() -> Vec<PoolSelection> {
        (1u8..16)
            .map(|bits| {
                CharacterPool::ALL
                    .into_iter()
                    .enumerate()
                    .filter(|(idx, _)| bits & (1 << idx) != 0)
                    .map(|(_, pool)| pool)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn includes_every_selected_pool() {
        let mut rng = seeded(1);
        for selection in every_selection() {
            for length in selection.count()..selection.count() + 8 {
                for _ in 0..50 {
                    let password = generate_password(&mut rng, &selection, length).unwrap();
                    for pool in selection.pools() {
                        assert!(
                            password.as_str().chars().any(|ch| pool.contains(ch)),
                            "{pool} missing from password of length {length}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn only_uses_selected_characters() {
        let mut rng = seeded(2);
        for selection in every_selection() {
            let union = selection.union();
            let password = generate_password(&mut rng, &selection, 64).unwrap();
            assert!(password.as_str().chars().all(|ch| union.contains(&ch)));
        }
    }

    #[test]
    fn has_requested_length() {
        let mut rng = seeded(3);
        for length in [4, 5, 16, 100] {
            let password = generate_password(&mut rng, &PoolSelection::all(), length).unwrap();
            assert_eq!(password.len(), length);
        }
    }

    #[test]
    fn no_pools_is_an_error() {
        let mut rng = seeded(4);
        for length in [0, 1, 16] {
            assert_eq!(
                generate_password(&mut rng, &PoolSelection::default(), length),
                Err(GenerationError::NoPoolsSelected)
            );
        }
    }

    #[test]
    fn zero_length_is_an_error() {
        let mut rng = seeded(5);
        assert_eq!(
            generate_password(&mut rng, &PoolSelection::all(), 0),
            Err(GenerationError::InvalidLength("0".to_owned()))
        );
    }

    #[test]
    fn length_below_pool_count_is_an_error() {
        let mut rng = seeded(6);
        assert_eq!(
            generate_password(&mut rng, &PoolSelection::all(), 3),
            Err(GenerationError::LengthBelowPoolCount {
                length: 3,
                pools: 4
            })
        );
    }

    #[test]
    fn parses_lengths() {
        assert_eq!(parse_length("16"), Ok(16));
        assert_eq!(parse_length("  8\n"), Ok(8));
        for bad in ["", "0", "-4", "abc", "12abc", "1.5", "NaN", "inf"] {
            assert!(
                matches!(parse_length(bad), Err(GenerationError::InvalidLength(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn entropy_estimate() {
        let digits = PoolSelection {
            digits: true,
            ..PoolSelection::default()
        };
        assert!((entropy_bits(&digits, 3) - 3.0 * 10f64.log2()).abs() < 1e-9);
        assert_eq!(entropy_bits(&PoolSelection::default(), 10), 0.0);
        assert_eq!(entropy_bits(&PoolSelection::all(), 0), 0.0);
    }

    #[test]
    fn pick_is_uniform_over_small_alphabets() {
        // 16 symbols; df = 15, p = 0.001 critical value is 37.70.
        let alphabet = "0123456789abcdef".chars().collect::<Vec<_>>();
        let mut rng = seeded(7);
        let trials = 160_000;
        let mut counts = HashMap::new();
        for _ in 0..trials {
            *counts.entry(pick(&mut rng, &alphabet)).or_insert(0usize) += 1;
        }
        assert_eq!(counts.len(), alphabet.len());
        let stat = chi_squared(counts.into_values(), trials as f64 / alphabet.len() as f64);
        assert!(stat < 37.70, "chi-squared statistic too large: {stat}");
    }

    #[test]
    fn shuffle_is_a_uniform_permutation() {
        // 3! = 6 orderings; df = 5, p = 0.001 critical value is 20.52.
        let mut rng = seeded(8);
        let trials = 60_000;
        let mut counts = HashMap::new();
        for _ in 0..trials {
            let mut chars = ['a', 'b', 'c'];
            shuffle(&mut rng, &mut chars);
            *counts.entry(chars).or_insert(0usize) += 1;
        }
        assert_eq!(counts.len(), 6);
        let stat = chi_squared(counts.into_values(), trials as f64 / 6.0);
        assert!(stat < 20.52, "chi-squared statistic too large: {stat}");
    }

    #[test]
    fn guaranteed_characters_are_not_pinned_to_the_front() {
        // With one digit guaranteed and the rest uppercase-or-digit filler, the first position
        // must sometimes hold a letter.
        let selection = PoolSelection {
            uppercase: true,
            digits: true,
            ..PoolSelection::default()
        };
        let mut rng = seeded(9);
        let mut first_is_letter = 0;
        for _ in 0..1_000 {
            let password = generate_password(&mut rng, &selection, 2).unwrap();
            if password.as_str().starts_with(|ch: char| ch.is_ascii_digit()) {
                continue;
            }
            first_is_letter += 1;
        }
        assert!(first_is_letter > 400 && first_is_letter < 600, "{first_is_letter}");
    }
}
