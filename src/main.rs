//! Saturn Crypto CLI
//!
//! SHA-3 / SHA-512 digests, HMAC-SHA256 tokens and secure random strings.
//! Set `RUST_LOG=debug` for chunk and key-loading diagnostics.
#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use saturn_crypto::config::CryptoConfig;
use saturn_crypto::crypto::hmac::{create_hmac, create_timestamped_hmac};
use saturn_crypto::crypto::random::{random_string, DEFAULT_CHARACTER_SET};
use saturn_crypto::crypto::sha3::{DigestSize, Sha3};
use saturn_crypto::crypto::stream::{sha3_file, sha512_file_hex, sha512_hex};

/* ===== CLI STRUCTURE ===== */

#[derive(Parser)]
#[command(name = "saturn-crypto")]
#[command(about = "Saturn crypto utilities - SHA-3, SHA-512, HMAC tokens, random strings", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with master keys (default: environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Hash this UTF-8 text
    #[arg(long)]
    text: Option<String>,

    /// Hash this file's contents
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// SHA-3 digest (uppercase hex)
    Sha3 {
        /// Digest size: 224, 256, 384 or 512
        #[arg(long, default_value_t = 512, allow_negative_numbers = true)]
        bits: i32,

        #[command(flatten)]
        input: InputArgs,
    },

    /// SHA-512 digest (uppercase hex)
    Sha512 {
        #[command(flatten)]
        input: InputArgs,
    },

    /// HMAC-SHA256 token (base64)
    Hmac {
        /// Message to authenticate
        #[arg(short, long)]
        message: String,

        /// Secret key (default: configured master hash key)
        #[arg(short, long)]
        secret: Option<String>,

        /// Append a UTC timestamp to the message before signing
        #[arg(long)]
        timestamped: bool,

        /// Timestamp to use instead of now (RFC 3339); implies --timestamped
        #[arg(long)]
        timestamp: Option<String>,
    },

    /// Random string from a character set
    Random {
        /// Number of characters
        #[arg(short, long)]
        length: usize,

        /// Characters to draw from (duplicates ignored)
        #[arg(long, default_value = DEFAULT_CHARACTER_SET)]
        charset: String,
    },
}

/* ===== COMMAND HANDLERS ===== */

fn cmd_sha3(bits: i32, input: InputArgs) -> anyhow::Result<()> {
    let size = DigestSize::from_bits(bits)?;
    let digest = match (input.text, input.file) {
        (Some(text), _) => Sha3::digest(size, text.as_bytes()),
        (None, Some(path)) => sha3_file(&path, size)
            .with_context(|| format!("hashing {}", path.display()))?,
        (None, None) => anyhow::bail!("either --text or --file is required"),
    };
    println!("{digest}");
    Ok(())
}

fn cmd_sha512(input: InputArgs) -> anyhow::Result<()> {
    let hex = match (input.text, input.file) {
        (Some(text), _) => sha512_hex(&text),
        (None, Some(path)) => sha512_file_hex(&path)
            .with_context(|| format!("hashing {}", path.display()))?,
        (None, None) => anyhow::bail!("either --text or --file is required"),
    };
    println!("{hex}");
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<CryptoConfig> {
    match path {
        Some(path) => CryptoConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => CryptoConfig::from_env().context("loading master keys from environment"),
    }
}

fn cmd_hmac(
    message: String,
    secret: Option<String>,
    timestamped: bool,
    at: Option<String>,
    config: Option<&PathBuf>,
) -> anyhow::Result<()> {
    let at = at
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .with_context(|| format!("invalid timestamp {s:?}"))
        })
        .transpose()?;
    let timestamped = timestamped || at.is_some();

    let token = match secret {
        Some(secret) if timestamped => create_timestamped_hmac(&message, &secret, at)?,
        Some(secret) => create_hmac(&message, &secret)?,
        None => {
            let config = load_config(config)?;
            if timestamped {
                config.timestamped_hmac(&message, at)?
            } else {
                config.hmac(&message)?
            }
        }
    };
    println!("{token}");
    Ok(())
}

fn cmd_random(length: usize, charset: String) -> anyhow::Result<()> {
    println!("{}", random_string(length, &charset)?);
    Ok(())
}

/* ===== MAIN ===== */

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sha3 { bits, input } => cmd_sha3(bits, input),
        Commands::Sha512 { input } => cmd_sha512(input),
        Commands::Hmac { message, secret, timestamped, timestamp } => {
            cmd_hmac(message, secret, timestamped, timestamp, cli.config.as_ref())
        }
        Commands::Random { length, charset } => cmd_random(length, charset),
    }
}
