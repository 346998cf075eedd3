//! Error taxonomy for the Saturn crypto utilities.
//!
//! Every failure is local and deterministic. `InvalidParameter` and
//! `InvalidState` are programmer errors (bad digest size, lifecycle misuse);
//! `InvalidArgument` rejects caller input such as blank HMAC secrets.

#![forbid(unsafe_code)]

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: &'static str },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

impl CryptoError {
    pub(crate) fn invalid_parameter(name: &'static str, value: impl ToString) -> Self {
        CryptoError::InvalidParameter { name, value: value.to_string() }
    }

    pub(crate) fn invalid_argument(name: &'static str, reason: &'static str) -> Self {
        CryptoError::InvalidArgument { name, reason }
    }
}
