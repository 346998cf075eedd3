//! HMAC-SHA256 token helpers.
//!
//! Message and secret are ASCII-encoded (any non-ASCII character becomes
//! `?`), authenticated with HMAC-SHA256 and returned as padded standard
//! base64. The timestamped variant appends a round-trip UTC timestamp
//! (`YYYY-MM-DDTHH:MM:SS.fffffffZ`) to the message before signing.

#![forbid(unsafe_code)]

use base64ct::{Base64, Encoding};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{CryptoError, Result};

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 output length in bytes.
pub const HMAC_SHA256_LEN: usize = 32;

/// Raw keyed MAC: HMAC-SHA256(secret, message).
pub fn hmac_sha256(message: &[u8], secret: &[u8]) -> Result<[u8; HMAC_SHA256_LEN]> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|_| CryptoError::invalid_argument("secret", "rejected as HMAC key"))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().into())
}

/// Base64 HMAC-SHA256 of `message` under `secret`.
pub fn create_hmac(message: &str, secret: &str) -> Result<String> {
    ensure_not_blank("message", message)?;
    ensure_not_blank("secret", secret)?;

    sign(&ascii_bytes(message), secret)
}

/// Base64 HMAC-SHA256 of `message ‖ timestamp`; `at = None` stamps the current UTC time.
pub fn create_timestamped_hmac(
    message: &str,
    secret: &str,
    at: Option<DateTime<Utc>>,
) -> Result<String> {
    ensure_not_blank("message", message)?;
    ensure_not_blank("secret", secret)?;

    let at = at.unwrap_or_else(Utc::now);
    let mut input = ascii_bytes(message);
    input.extend_from_slice(format_round_trip(&at).as_bytes());
    sign(&input, secret)
}

/// Round-trip timestamp with 100 ns precision, e.g. `2024-01-02T03:04:05.1234567Z`.
pub fn format_round_trip(at: &DateTime<Utc>) -> String {
    // Leap seconds report nanos >= 1e9.
    let ticks = (at.timestamp_subsec_nanos() % 1_000_000_000) / 100;
    format!("{}.{:07}Z", at.format("%Y-%m-%dT%H:%M:%S"), ticks)
}

fn sign(message: &[u8], secret: &str) -> Result<String> {
    let tag = hmac_sha256(message, &ascii_bytes(secret))?;
    Ok(Base64::encode_string(&tag))
}

fn ensure_not_blank(name: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CryptoError::invalid_argument(name, "must not be empty or whitespace"));
    }
    Ok(())
}

fn ascii_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}
