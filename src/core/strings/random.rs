use rand::Rng;

use crate::error::{Error, Result};

pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const DIGITS: &str = "0123456789";

/// `length` characters drawn independently and uniformly from `alphabet`.
pub fn random_string(length: usize, alphabet: &str) -> Result<String> {
    let symbols: Vec<char> = alphabet.chars().collect();
    if symbols.is_empty() {
        return Err(Error::validation_invalid_argument(
            "alphabet",
            "Alphabet must contain at least one character",
            None,
            None,
        ));
    }

    let mut rng = rand::rng();
    Ok((0..length)
        .map(|_| symbols[rng.random_range(0..symbols.len())])
        .collect())
}

/// Numeric one-time password. Leading zeros are kept; the result is a digit
/// string, not a number.
pub fn generate_otp(length: usize) -> String {
    let digits: Vec<char> = DIGITS.chars().collect();
    let mut rng = rand::rng();
    (0..length)
        .map(|_| digits[rng.random_range(0..digits.len())])
        .collect()
}
