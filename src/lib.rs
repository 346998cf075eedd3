//! Saturn crypto utilities
//!
//! Building blocks shared by the Saturn services:
//! - crypto::keccak: Keccak-f[1600] permutation and sponge state
//! - crypto::sha3: bit-exact SHA3-224/256/384/512 sponge engine
//! - crypto::hmac: HMAC-SHA256 tokens, optionally timestamped
//! - crypto::random: secure random strings over a character set
//! - crypto::stream: chunked SHA-512 / SHA-3 digests over readers and files
//! - config: master key material, passed explicitly
//! - error: one error enum for all of the above

#![forbid(unsafe_code)]

pub mod config;
pub mod crypto;
pub mod error;

// Re-export main types for convenience
pub use config::CryptoConfig;
pub use crypto::hmac::{create_hmac, create_timestamped_hmac};
pub use crypto::random::{random_string, DEFAULT_CHARACTER_SET};
pub use crypto::sha3::{hash, hash_hex, Digest, DigestSize, Sha3};
pub use crypto::to_hex_upper;
pub use error::{CryptoError, Result};
