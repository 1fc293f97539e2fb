//! Random password generation and a simple strength score.

use rand::seq::IndexedRandom;
use zeroize::Zeroizing;

/// Characters used when `special` is enabled.
const SPECIAL_CHARS: &[u8] = b"!@#$%^&*()-_+=";

/// Options for `generate_password`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub length: usize,
    pub digits: bool,
    pub upper: bool,
    pub special: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 12,
            digits: true,
            upper: true,
            special: true,
        }
    }
}

impl GeneratorOptions {
    /// The alphabet every character is drawn from.  Lowercase letters are
    /// always included.
    fn alphabet(&self) -> Vec<u8> {
        let mut chars: Vec<u8> = (b'a'..=b'z').collect();
        if self.upper {
            chars.extend(b'A'..=b'Z');
        }
        if self.digits {
            chars.extend(b'0'..=b'9');
        }
        if self.special {
            chars.extend_from_slice(SPECIAL_CHARS);
        }
        chars
    }
}

/// Generate a random password.  Each character is drawn uniformly from the
/// alphabet described by `options` using the thread-local CSPRNG.
pub fn generate_password(options: &GeneratorOptions) -> Zeroizing<String> {
    let alphabet = options.alphabet();
    let mut rng = rand::rng();

    let mut password = Zeroizing::new(String::with_capacity(options.length));
    for _ in 0..options.length {
        if let Some(&c) = alphabet.choose(&mut rng) {
            password.push(char::from(c));
        }
    }
    password
}

/// Score a password from 0 (empty) to 100.
///
/// Length earns 4 points per character up to 40.  Each character class
/// present adds a bonus (lower 10, upper 10, digit 10, other 15), mixing
/// classes adds 5 per class beyond the first, and every distinct character
/// that appears more than once costs 2.
pub fn password_strength(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }

    let length = password.chars().count();
    let mut score: i64 = i64::try_from(length.saturating_mul(4).min(40)).unwrap_or(40);

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_numeric());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    if has_lower {
        score += 10;
    }
    if has_upper {
        score += 10;
    }
    if has_digit {
        score += 10;
    }
    if has_special {
        score += 15;
    }

    let classes = [has_lower, has_upper, has_digit, has_special]
        .iter()
        .filter(|&&present| present)
        .count();
    score += (i64::try_from(classes).unwrap_or(0) - 1) * 5;

    let mut seen = std::collections::HashMap::new();
    for c in password.chars() {
        *seen.entry(c).or_insert(0u32) += 1;
    }
    let repeated = seen.values().filter(|&&count| count > 1).count();
    score -= i64::try_from(repeated).unwrap_or(i64::MAX / 4) * 2;

    u8::try_from(score.clamp(0, 100)).unwrap_or(100)
}
