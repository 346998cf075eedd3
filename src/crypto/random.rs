//! Cryptographically secure random strings.
//!
//! Each output character consumes 8 random bytes: the little-endian `u64`
//! reduced modulo the size of the (deduplicated) character set picks the
//! character. The 64-bit draw keeps modulo bias below 2^-50 for any
//! realistic character set.

#![forbid(unsafe_code)]

use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::{CryptoError, Result};

/// Letters, digits and common punctuation.
pub const DEFAULT_CHARACTER_SET: &str =
    r#"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!"?$%^&*()-_=+[]#';/\"#;

/// Longest string that may be requested (random buffer stays below `i32::MAX` bytes).
pub const MAX_LENGTH: usize = i32::MAX as usize / 8;

const BYTES_PER_CHAR: usize = 8;

/// Random string of `length` characters from `character_set`, using the OS RNG.
pub fn random_string(length: usize, character_set: &str) -> Result<String> {
    random_string_with(&mut OsRng, length, character_set)
}

/// Random string drawn from the caller's cryptographically secure RNG.
pub fn random_string_with<R: RngCore + CryptoRng>(
    rng: &mut R,
    length: usize,
    character_set: &str,
) -> Result<String> {
    if length > MAX_LENGTH {
        return Err(CryptoError::invalid_argument("length", "length is too big"));
    }
    let alphabet = distinct_chars(character_set);
    if alphabet.is_empty() {
        return Err(CryptoError::invalid_argument(
            "character_set",
            "character set must not be empty",
        ));
    }

    let mut bytes = Zeroizing::new(vec![0u8; length * BYTES_PER_CHAR]);
    rng.fill_bytes(&mut bytes);

    let n = alphabet.len() as u64;
    Ok(bytes
        .chunks_exact(BYTES_PER_CHAR)
        .map(|b| {
            let value = u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]);
            alphabet[(value % n) as usize]
        })
        .collect())
}

/// Characters of `s` in first-occurrence order, duplicates removed.
fn distinct_chars(s: &str) -> Vec<char> {
    let mut out: Vec<char> = Vec::new();
    for c in s.chars() {
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}
