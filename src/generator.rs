// This file is part of Strongpass.
//
// Copyright (c) 2025  René Coignard <contact@renecoignard.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use crate::charset::CharClass;
use crate::config::{Config, MAX_LENGTH, MIN_CLASS_COUNT, MIN_LENGTH};
use crate::entropy::{random_index, EntropySource, OsEntropy};
use crate::error::{Error, Result};
use zeroize::Zeroizing;

/// Generates one password from the operating system CSPRNG.
pub fn generate(config: Config) -> Result<Zeroizing<String>> {
    generate_with(OsEntropy, config)
}

pub fn generate_with<S: EntropySource>(
    mut source: S,
    config: Config,
) -> Result<Zeroizing<String>> {
    check_constraints(&config)?;

    let mut password_bytes = Zeroizing::new(Vec::with_capacity(config.length));

    for class in CharClass::ALL {
        let count = config.count_for(class).unwrap_or(0);
        log::debug!("Sampling {} {} characters", count, class);
        let sample = random_characters(&mut source, class, count)?;
        password_bytes.extend_from_slice(&sample);
    }

    let shuffled = shuffle(&mut source, &password_bytes)?;

    let result = String::from_utf8(shuffled.to_vec())
        .map_err(|e| Error::ConstraintViolation(format!("Non-ASCII output: {}", e)))?;

    Ok(Zeroizing::new(result))
}

/// Draws `count` characters from `class` independently, with replacement.
pub fn random_characters<S: EntropySource + ?Sized>(
    source: &mut S,
    class: CharClass,
    count: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    let alphabet = class.alphabet();
    let mut characters = Zeroizing::new(Vec::with_capacity(count));

    for _ in 0..count {
        characters.push(alphabet[random_index(source, alphabet.len())?]);
    }

    Ok(characters)
}

/// Uniform permutation by repeatedly extracting a random element from a
/// shrinking pool.
///
/// Pools longer than 256 elements are rejected since the index primitive
/// only covers a single byte.
pub fn shuffle<S: EntropySource + ?Sized>(
    source: &mut S,
    input: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let mut pool = Zeroizing::new(input.to_vec());
    let mut shuffled = Zeroizing::new(Vec::with_capacity(input.len()));

    while !pool.is_empty() {
        let index = random_index(source, pool.len())?;
        shuffled.push(pool.remove(index));
    }

    Ok(shuffled)
}

fn check_constraints(config: &Config) -> Result<()> {
    if config.length < MIN_LENGTH {
        return Err(Error::ConstraintViolation(format!(
            "Password length {} is below the minimum of {}",
            config.length, MIN_LENGTH
        )));
    }

    if config.length > MAX_LENGTH {
        return Err(Error::ConstraintViolation(format!(
            "Password length {} is above the maximum of {}",
            config.length, MAX_LENGTH
        )));
    }

    for class in [CharClass::Uppercase, CharClass::Digits, CharClass::Special] {
        if config.count_for(class).unwrap_or(0) < MIN_CLASS_COUNT {
            return Err(Error::ConstraintViolation(format!(
                "At least {} {} character is required",
                MIN_CLASS_COUNT, class
            )));
        }
    }

    if config.lowercase_count().is_none() {
        return Err(Error::ConstraintViolation(format!(
            "Minimums add up to {} which exceeds the password length {}",
            config.required(),
            config.length
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::Composition;
    use crate::entropy::tests::ScriptedEntropy;
    use crate::entropy::KeystreamEntropy;
    use std::collections::HashMap;

    fn sorted(bytes: &[u8]) -> Vec<u8> {
        let mut v = bytes.to_vec();
        v.sort_unstable();
        v
    }

    fn assert_satisfies(password: &str, config: &Config) {
        assert_eq!(password.len(), config.length);

        let composition = Composition::of(password);
        assert_eq!(composition.other, 0, "Foreign characters in {:?}", password);
        assert_eq!(composition.uppercase, config.min_uppercase);
        assert_eq!(composition.digits, config.min_digits);
        assert_eq!(composition.special, config.min_special);
        assert_eq!(Some(composition.lowercase), config.lowercase_count());
    }

    #[test]
    fn test_minimal_config() {
        let config = Config::new(8, 1, 1, 1);
        let password = generate(config).unwrap();
        assert_satisfies(&password, &config);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        let password = generate(config).unwrap();
        assert_satisfies(&password, &config);
        assert_eq!(Composition::of(&password).lowercase, 11);
    }

    #[test]
    fn test_no_lowercase_when_minimums_fill_length() {
        let config = Config::new(8, 3, 3, 2);
        let password = generate(config).unwrap();
        assert_satisfies(&password, &config);
        assert_eq!(Composition::of(&password).lowercase, 0);
    }

    #[test]
    fn test_many_configs_keystream() {
        let mut source = KeystreamEntropy::new(&[9u8; 32]);

        for length in [8, 9, 14, 32, 64, 256] {
            for (u, d, s) in [(1, 1, 1), (2, 3, 1), (1, 5, 2), (3, 3, 2)] {
                let config = Config::new(length, u, d, s);
                let password = generate_with(&mut source, config).unwrap();
                assert_satisfies(&password, &config);
            }
        }
    }

    #[test]
    fn test_deterministic_with_keystream() {
        let config = Config::new(20, 2, 2, 2);
        let first = generate_with(KeystreamEntropy::new(&[42u8; 32]), config).unwrap();
        let second = generate_with(KeystreamEntropy::new(&[42u8; 32]), config).unwrap();
        assert_eq!(*first, *second);

        let other = generate_with(KeystreamEntropy::new(&[43u8; 32]), config).unwrap();
        assert_ne!(*first, *other);
    }

    #[test]
    fn test_repeated_calls_differ() {
        let config = Config::new(32, 1, 1, 1);
        let first = generate(config).unwrap();
        let second = generate(config).unwrap();
        assert_ne!(*first, *second);
    }

    #[test]
    fn test_concurrent_generation() {
        let config = Config::new(24, 2, 2, 2);
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(move || generate(config).map(|p| p.to_string())))
            .collect();

        for handle in handles {
            let password = handle.join().unwrap().unwrap();
            assert_satisfies(&password, &config);
        }
    }

    #[test]
    fn test_random_characters_stay_in_class() {
        let mut source = KeystreamEntropy::new(&[5u8; 32]);

        for class in CharClass::ALL {
            let sample = random_characters(&mut source, class, 200).unwrap();
            assert_eq!(sample.len(), 200);
            assert!(
                sample.iter().all(|b| class.alphabet().contains(b)),
                "Sample for {} escaped its alphabet",
                class
            );
        }
    }

    #[test]
    fn test_random_characters_zero_count() {
        let mut source = ScriptedEntropy::new(&[]);
        let sample = random_characters(&mut source, CharClass::Lowercase, 0).unwrap();
        assert!(sample.is_empty());
        assert_eq!(source.consumed(), 0);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut source = KeystreamEntropy::new(&[11u8; 32]);
        let input = b"aaaBBB123$$$xyz".to_vec();

        for _ in 0..100 {
            let output = shuffle(&mut source, &input).unwrap();
            assert_eq!(output.len(), input.len());
            assert_eq!(sorted(&output), sorted(&input));
        }
    }

    #[test]
    fn test_shuffle_scripted_order() {
        // Pool "abcd": take index 2 (c), then 0 (a), then 1 of "bd" (d), then b.
        let mut source = ScriptedEntropy::new(&[2, 0, 1, 0]);
        let output = shuffle(&mut source, b"abcd").unwrap();
        assert_eq!(output.as_slice(), b"cadb");
        assert_eq!(source.consumed(), 4);
    }

    #[test]
    fn test_shuffle_empty_input() {
        let mut source = ScriptedEntropy::new(&[]);
        let output = shuffle(&mut source, b"").unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_shuffle_position_distribution() {
        let mut source = KeystreamEntropy::new(&[21u8; 32]);
        let input = b"abcdefgh";
        let trials = 40_000;
        let mut counts: HashMap<(usize, u8), usize> = HashMap::new();

        for _ in 0..trials {
            let output = shuffle(&mut source, input).unwrap();
            for (position, byte) in output.iter().enumerate() {
                *counts.entry((position, *byte)).or_default() += 1;
            }
        }

        let expected = trials / input.len();
        for position in 0..input.len() {
            for byte in input {
                let count = counts.get(&(position, *byte)).copied().unwrap_or(0);
                assert!(
                    count.abs_diff(expected) < expected / 10,
                    "Position {} held {:?} {} times, expected about {}",
                    position,
                    *byte as char,
                    count,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_shuffle_rejects_oversized_pool() {
        let mut source = KeystreamEntropy::new(&[1u8; 32]);
        let input = vec![b'a'; 257];
        assert!(matches!(
            shuffle(&mut source, &input),
            Err(Error::ConstraintViolation(_))
        ));
    }

    #[test]
    fn test_constraint_violations() {
        let cases = [
            Config::new(7, 1, 1, 1),
            Config::new(257, 1, 1, 1),
            Config::new(8, 0, 1, 1),
            Config::new(8, 1, 0, 1),
            Config::new(8, 1, 1, 0),
            Config::new(8, 4, 4, 1),
        ];

        for config in cases {
            let result = generate_with(KeystreamEntropy::new(&[0u8; 32]), config);
            assert!(
                matches!(result, Err(Error::ConstraintViolation(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_entropy_failure_propagates() {
        let config = Config::new(8, 1, 1, 1);
        let result = generate_with(ScriptedEntropy::new(&[0, 0, 0]), config);
        assert!(matches!(result, Err(Error::EntropyUnavailable(_))));
    }
}
