//! Master key configuration.
//!
//! Holds the master encryption key and master hash key. Build one at
//! startup (from the environment or a JSON file) and pass it to whatever
//! needs the keys; nothing here is global.
//!
//! JSON layout:
//!
//! ```json
//! { "master_encryption_key": "...", "master_hash_key": "..." }
//! ```

#![forbid(unsafe_code)]

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::crypto::hmac::{create_hmac, create_timestamped_hmac};
use crate::error::{CryptoError, Result};

pub const ENV_MASTER_ENCRYPTION_KEY: &str = "SATURN_MASTER_ENCRYPTION_KEY";
pub const ENV_MASTER_HASH_KEY: &str = "SATURN_MASTER_HASH_KEY";

#[derive(Deserialize)]
struct KeyFile {
    #[serde(alias = "MasterEncryptionKey")]
    master_encryption_key: String,
    #[serde(alias = "MasterHashKey")]
    master_hash_key: String,
}

/// Master key material, zeroized on drop.
#[derive(Clone)]
pub struct CryptoConfig {
    master_encryption_key: Zeroizing<String>,
    master_hash_key: Zeroizing<String>,
}

impl CryptoConfig {
    pub fn new(master_encryption_key: impl Into<String>, master_hash_key: impl Into<String>) -> Self {
        Self {
            master_encryption_key: Zeroizing::new(master_encryption_key.into()),
            master_hash_key: Zeroizing::new(master_hash_key.into()),
        }
    }

    /// Read both keys from `SATURN_MASTER_ENCRYPTION_KEY` / `SATURN_MASTER_HASH_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch = |name: &str| {
            lookup(name).ok_or_else(|| CryptoError::Config(format!("{name} is not set")))
        };
        let config = Self::new(fetch(ENV_MASTER_ENCRYPTION_KEY)?, fetch(ENV_MASTER_HASH_KEY)?);
        log::info!("master keys loaded from environment");
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: KeyFile = serde_json::from_str(json)?;
        Ok(Self::new(file.master_encryption_key, file.master_hash_key))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = Zeroizing::new(std::fs::read_to_string(path)?);
        let config = Self::from_json_str(&json)?;
        log::info!("master keys loaded from {}", path.display());
        Ok(config)
    }

    pub fn master_encryption_key(&self) -> &str {
        &self.master_encryption_key
    }

    pub fn master_hash_key(&self) -> &str {
        &self.master_hash_key
    }

    /// Replace the encryption key; the old value is zeroized.
    pub fn set_master_encryption_key(&mut self, key: impl Into<String>) {
        self.master_encryption_key = Zeroizing::new(key.into());
        log::info!("master encryption key rotated");
    }

    /// Replace the hash key; the old value is zeroized.
    pub fn set_master_hash_key(&mut self, key: impl Into<String>) {
        self.master_hash_key = Zeroizing::new(key.into());
        log::info!("master hash key rotated");
    }

    /// HMAC token for `message` under the master hash key.
    pub fn hmac(&self, message: &str) -> Result<String> {
        create_hmac(message, &self.master_hash_key)
    }

    /// Timestamped HMAC token under the master hash key.
    pub fn timestamped_hmac(&self, message: &str, at: Option<DateTime<Utc>>) -> Result<String> {
        create_timestamped_hmac(message, &self.master_hash_key, at)
    }
}

impl fmt::Debug for CryptoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoConfig")
            .field("master_encryption_key", &"<redacted>")
            .field("master_hash_key", &"<redacted>")
            .finish()
    }
}
