//! Password and random number generators

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const LENGTH_RANGE: RangeInclusive<usize> = 4..=128;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordOptions {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }
}

impl PasswordOptions {
    fn classes(&self) -> Vec<&'static [u8]> {
        [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.digits, DIGITS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter_map(|(on, set)| on.then_some(set))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn translation_key(self) -> &'static str {
        match self {
            Strength::Weak => "tools.password.strength.weak",
            Strength::Medium => "tools.password.strength.medium",
            Strength::Strong => "tools.password.strength.strong",
            Strength::VeryStrong => "tools.password.strength.very_strong",
        }
    }
}

pub fn generate(options: &PasswordOptions) -> Option<String> {
    generate_with(&mut rand::thread_rng(), options)
}

/// One character from every selected class first, then the rest drawn
/// from the union, shuffled so the guaranteed ones have no fixed position.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, options: &PasswordOptions) -> Option<String> {
    if !LENGTH_RANGE.contains(&options.length) {
        return None;
    }
    let classes = options.classes();
    if classes.is_empty() {
        return None;
    }
    let pool: Vec<u8> = classes.concat();

    let mut chars: Vec<u8> = Vec::with_capacity(options.length);
    for class in &classes {
        chars.push(*class.choose(rng)?);
    }
    while chars.len() < options.length {
        chars.push(*pool.choose(rng)?);
    }
    chars.shuffle(rng);

    String::from_utf8(chars).ok()
}

/// Length and character variety, scored 0..=7
pub fn strength(password: &str) -> Strength {
    let len = password.chars().count();
    let mut score = 0;
    if len >= 8 {
        score += 1;
    }
    if len >= 12 {
        score += 1;
    }
    if len >= 16 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_alphanumeric()) {
        score += 1;
    }

    match score {
        0..=2 => Strength::Weak,
        3..=4 => Strength::Medium,
        5..=6 => Strength::Strong,
        _ => Strength::VeryStrong,
    }
}

/// Uniform integer in `min..=max`
pub fn random_in_range(min: i64, max: i64) -> Option<i64> {
    if min > max {
        return None;
    }
    Some(rand::thread_rng().gen_range(min..=max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_options() {
        let password = generate(&PasswordOptions::default()).unwrap();
        assert_eq!(password.len(), 16);
    }

    #[test]
    fn test_rejects_bad_options() {
        let short = PasswordOptions { length: 3, ..Default::default() };
        assert!(generate(&short).is_none());
        let long = PasswordOptions { length: 129, ..Default::default() };
        assert!(generate(&long).is_none());
        let none = PasswordOptions {
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: false,
            ..Default::default()
        };
        assert!(generate(&none).is_none());
    }

    #[test]
    fn test_single_class() {
        let digits = PasswordOptions {
            length: 32,
            uppercase: false,
            lowercase: false,
            digits: true,
            symbols: false,
        };
        let password = generate(&digits).unwrap();
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_strength() {
        assert_eq!(strength("abc"), Strength::Weak);
        assert_eq!(strength("abcdefgh1"), Strength::Medium);
        assert_eq!(strength("Abcdefgh1234"), Strength::Strong);
        assert_eq!(strength("Abcdefgh1234!@#$"), Strength::VeryStrong);
    }

    #[test]
    fn test_random_in_range() {
        for _ in 0..100 {
            let n = random_in_range(1, 6).unwrap();
            assert!((1..=6).contains(&n));
        }
        assert_eq!(random_in_range(7, 7), Some(7));
        assert_eq!(random_in_range(10, 1), None);
    }

    proptest! {
        #[test]
        fn every_selected_class_is_present(
            seed in any::<u64>(),
            length in 4usize..=128,
            upper in any::<bool>(),
            lower in any::<bool>(),
            digits in any::<bool>(),
            symbols in any::<bool>(),
        ) {
            let options = PasswordOptions { length, uppercase: upper, lowercase: lower, digits, symbols };
            let mut rng = StdRng::seed_from_u64(seed);
            let generated = generate_with(&mut rng, &options);
            if !(upper || lower || digits || symbols) {
                prop_assert!(generated.is_none());
            } else {
                let password = generated.unwrap();
                prop_assert_eq!(password.len(), length);
                prop_assert_eq!(password.chars().any(|c| c.is_ascii_uppercase()), upper);
                prop_assert_eq!(password.chars().any(|c| c.is_ascii_lowercase()), lower);
                prop_assert_eq!(password.chars().any(|c| c.is_ascii_digit()), digits);
                prop_assert_eq!(password.chars().any(|c| SYMBOLS.contains(&(c as u8))), symbols);
            }
        }
    }
}
