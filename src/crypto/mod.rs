//! Cryptographic Utilities for Saturn
//!
//! - keccak: Keccak-f[1600] permutation and sponge state
//! - sha3: SHA3-224/256/384/512 sponge engine
//! - hmac: HMAC-SHA256 tokens (plain and timestamped)
//! - random: Secure random strings over a character set
//! - stream: Chunked SHA-512 / SHA-3 over readers and files

#![forbid(unsafe_code)]

pub mod hmac;
pub mod keccak;
pub mod random;
pub mod sha3;
pub mod stream;

/// Uppercase hex, two characters per byte, no separators.
pub fn to_hex_upper(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_upper(bytes)
}
