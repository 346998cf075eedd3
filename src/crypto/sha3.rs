//! SHA-3 sponge hash engine (FIPS 202) on top of [`keccak_f1600`](super::keccak::keccak_f1600).
//!
//! | Variant    | Rate (bits) | Capacity (bits) | Digest (bytes) |
//! |------------|-------------|-----------------|----------------|
//! | SHA3-224   | 1152        | 448             | 28             |
//! | SHA3-256   | 1088        | 512             | 32             |
//! | SHA3-384   | 832         | 768             | 48             |
//! | SHA3-512   | 576         | 1024            | 64             |
//!
//! # Example
//!
//! ```
//! use saturn_crypto::crypto::sha3::{DigestSize, Sha3};
//!
//! let mut engine = Sha3::new(DigestSize::Sha3_256);
//! engine.update(b"ab").unwrap();
//! engine.update(b"c").unwrap();
//! let digest = engine.finalize().unwrap();
//! assert_eq!(
//!     digest.to_hex(),
//!     "3A985DA74FE225B2045C172D6BD390BD855F086E3E9D525B46BFE24511431532"
//! );
//! ```

#![forbid(unsafe_code)]

use core::fmt;
use core::str::FromStr;

use zeroize::Zeroize;

use super::keccak::{KeccakState, STATE_BYTES};
use super::to_hex_upper;
use crate::error::{CryptoError, Result};

/// SHA-3 domain suffix `01` followed by the first padding bit.
const SHA3_PAD: u8 = 0x06;

/// Final padding bit, top of the last rate byte.
const PAD_LAST: u8 = 0x80;

/// Largest rate among supported sizes (SHA3-224).
pub const MAX_RATE_BYTES: usize = 144;

/* ============================================================================
 * Parameter sets
 * ========================================================================== */

/// Supported SHA-3 output sizes; each fixes the sponge rate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DigestSize {
    Sha3_224,
    Sha3_256,
    Sha3_384,
    #[default]
    Sha3_512,
}

impl DigestSize {
    pub const ALL: [DigestSize; 4] = [
        DigestSize::Sha3_224,
        DigestSize::Sha3_256,
        DigestSize::Sha3_384,
        DigestSize::Sha3_512,
    ];

    /// Map a bit length to a parameter set. Only 224, 256, 384 and 512 are accepted.
    pub fn from_bits(bits: i32) -> Result<Self> {
        match bits {
            224 => Ok(DigestSize::Sha3_224),
            256 => Ok(DigestSize::Sha3_256),
            384 => Ok(DigestSize::Sha3_384),
            512 => Ok(DigestSize::Sha3_512),
            other => Err(CryptoError::invalid_parameter("digest_size_bits", other)),
        }
    }

    /// Parse an algorithm name such as `"SHA3-256"` (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CryptoError::invalid_parameter("algorithm", name))
    }

    pub const fn name(self) -> &'static str {
        match self {
            DigestSize::Sha3_224 => "SHA3-224",
            DigestSize::Sha3_256 => "SHA3-256",
            DigestSize::Sha3_384 => "SHA3-384",
            DigestSize::Sha3_512 => "SHA3-512",
        }
    }

    pub const fn bits(self) -> usize {
        match self {
            DigestSize::Sha3_224 => 224,
            DigestSize::Sha3_256 => 256,
            DigestSize::Sha3_384 => 384,
            DigestSize::Sha3_512 => 512,
        }
    }

    pub const fn output_bytes(self) -> usize {
        self.bits() / 8
    }

    /// Bits absorbed or squeezed per permutation call.
    pub const fn rate_bits(self) -> usize {
        match self {
            DigestSize::Sha3_224 => 1152,
            DigestSize::Sha3_256 => 1088,
            DigestSize::Sha3_384 => 832,
            DigestSize::Sha3_512 => 576,
        }
    }

    pub const fn rate_bytes(self) -> usize {
        self.rate_bits() / 8
    }

    pub const fn capacity_bits(self) -> usize {
        STATE_BYTES * 8 - self.rate_bits()
    }
}

// Every rate is whole lanes, fits the state, fits the buffer, and yields the
// full digest from a single squeeze.
const _: () = {
    let mut i = 0;
    while i < DigestSize::ALL.len() {
        let size = DigestSize::ALL[i];
        assert!(size.rate_bits() % 64 == 0);
        assert!(size.rate_bits() < STATE_BYTES * 8);
        assert!(size.rate_bytes() <= MAX_RATE_BYTES);
        assert!(size.output_bytes() <= size.rate_bytes());
        i += 1;
    }
};

impl fmt::Display for DigestSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestSize {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl TryFrom<i32> for DigestSize {
    type Error = CryptoError;

    fn try_from(bits: i32) -> Result<Self> {
        Self::from_bits(bits)
    }
}

/* ============================================================================
 * Digest result
 * ========================================================================== */

/// Finished hash output, exactly `bits / 8` bytes long.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    bytes: Vec<u8>,
}

impl Digest {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Uppercase hex, two characters per byte, no separators.
    pub fn to_hex(&self) -> String {
        to_hex_upper(&self.bytes)
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Digest> for Vec<u8> {
    fn from(digest: Digest) -> Self {
        digest.bytes
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

/* ============================================================================
 * Sponge engine
 * ========================================================================== */

/// Incremental SHA-3 hasher.
///
/// Lifecycle: [`Sha3::new`] → any number of [`Sha3::update`] calls → one
/// [`Sha3::finalize`]. After finalizing, further calls fail with
/// [`CryptoError::InvalidState`] until [`Sha3::reset`].
#[derive(Clone)]
pub struct Sha3 {
    size: DigestSize,
    state: KeccakState,
    buffer: [u8; MAX_RATE_BYTES],
    buffered: usize,
    finalized: bool,
}

impl Sha3 {
    pub fn new(size: DigestSize) -> Self {
        Self {
            size,
            state: KeccakState::new(),
            buffer: [0u8; MAX_RATE_BYTES],
            buffered: 0,
            finalized: false,
        }
    }

    /// Construct from a bit length; anything other than 224/256/384/512 is rejected.
    pub fn with_bits(bits: i32) -> Result<Self> {
        DigestSize::from_bits(bits).map(Self::new)
    }

    pub fn digest_size(&self) -> DigestSize {
        self.size
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Absorb more input. Chunking never affects the final digest.
    pub fn update(&mut self, data: impl AsRef<[u8]>) -> Result<()> {
        if self.finalized {
            return Err(CryptoError::InvalidState("update called after finalize"));
        }
        self.absorb(data.as_ref());
        Ok(())
    }

    /// Pad, absorb the last block and squeeze the digest.
    pub fn finalize(&mut self) -> Result<Digest> {
        if self.finalized {
            return Err(CryptoError::InvalidState("finalize called twice"));
        }
        Ok(self.pad_and_squeeze())
    }

    /// Return to the freshly constructed state, keeping the digest size.
    pub fn reset(&mut self) {
        self.state.zeroize();
        self.buffer.zeroize();
        self.buffered = 0;
        self.finalized = false;
        log::debug!("{} engine reset", self.size);
    }

    /// One-shot hash for callers that already hold a [`DigestSize`].
    pub fn digest(size: DigestSize, data: impl AsRef<[u8]>) -> Digest {
        let mut engine = Self::new(size);
        engine.absorb(data.as_ref());
        engine.pad_and_squeeze()
    }

    fn absorb(&mut self, mut input: &[u8]) {
        let rate = self.size.rate_bytes();

        if self.buffered > 0 {
            let take = (rate - self.buffered).min(input.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&input[..take]);
            self.buffered += take;
            input = &input[take..];

            if self.buffered < rate {
                return;
            }
            self.state.absorb_block(&self.buffer[..rate]);
            self.buffered = 0;
        }

        let mut blocks = input.chunks_exact(rate);
        for block in &mut blocks {
            self.state.absorb_block(block);
        }

        let tail = blocks.remainder();
        self.buffer[..tail.len()].copy_from_slice(tail);
        self.buffered = tail.len();
    }

    fn pad_and_squeeze(&mut self) -> Digest {
        let rate = self.size.rate_bytes();
        let block = &mut self.buffer[..rate];
        block[self.buffered..].fill(0);
        // With one free byte left both marks share it: 0x86.
        block[self.buffered] ^= SHA3_PAD;
        block[rate - 1] |= PAD_LAST;
        self.state.absorb_block(&self.buffer[..rate]);

        let mut bytes = vec![0u8; self.size.output_bytes()];
        self.state.squeeze_into(&mut bytes);

        self.state.zeroize();
        self.buffer.zeroize();
        self.buffered = 0;
        self.finalized = true;

        Digest { bytes }
    }
}

impl fmt::Debug for Sha3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sha3")
            .field("size", &self.size)
            .field("buffered", &self.buffered)
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}

impl Drop for Sha3 {
    fn drop(&mut self) {
        self.state.zeroize();
        self.buffer.zeroize();
    }
}

/* ============================================================================
 * One-shot helpers
 * ========================================================================== */

/// `create(bits) → update(data) → finalize()`.
pub fn hash(bits: i32, data: impl AsRef<[u8]>) -> Result<Digest> {
    let size = DigestSize::from_bits(bits)?;
    Ok(Sha3::digest(size, data))
}

/// [`hash`] rendered as uppercase hex.
pub fn hash_hex(bits: i32, data: impl AsRef<[u8]>) -> Result<String> {
    hash(bits, data).map(|d| d.to_hex())
}

/// SHA3-512 of UTF-8 text as uppercase hex.
pub fn sha3_512_hex(input: &str) -> String {
    Sha3::digest(DigestSize::Sha3_512, input.as_bytes()).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i.wrapping_mul(31) ^ (i >> 3)) as u8).collect()
    }

    #[test]
    fn rejects_unsupported_sizes() {
        for bits in [0, 1, 160, 225, 513, 1024, -1, i32::MIN, i32::MAX] {
            match Sha3::with_bits(bits) {
                Err(CryptoError::InvalidParameter { name, value }) => {
                    assert_eq!(name, "digest_size_bits");
                    assert_eq!(value, bits.to_string());
                }
                other => panic!("expected InvalidParameter for {bits}, got {other:?}"),
            }
            assert!(hash(bits, b"abc").is_err());
        }
    }

    #[test]
    fn parameter_table() {
        let expected = [(224, 1152, 28), (256, 1088, 32), (384, 832, 48), (512, 576, 64)];
        for (size, (bits, rate, out)) in DigestSize::ALL.into_iter().zip(expected) {
            assert_eq!(size.bits(), bits);
            assert_eq!(size.rate_bits(), rate);
            assert_eq!(size.output_bytes(), out);
            assert_eq!(size.rate_bits() + size.capacity_bits(), 1600);
            assert_eq!(size.capacity_bits(), 2 * bits);
            assert_eq!(DigestSize::from_bits(bits as i32).unwrap(), size);
        }
    }

    #[test]
    fn names_round_trip() {
        for size in DigestSize::ALL {
            assert_eq!(DigestSize::from_name(size.name()).unwrap(), size);
            assert_eq!(size.to_string().parse::<DigestSize>().unwrap(), size);
        }
        assert_eq!(DigestSize::from_name("sha3-384").unwrap(), DigestSize::Sha3_384);
        assert_eq!(DigestSize::default(), DigestSize::Sha3_512);
        assert!(matches!(
            DigestSize::from_name("SHA3-1024"),
            Err(CryptoError::InvalidParameter { name: "algorithm", .. })
        ));
    }

    #[test]
    fn update_after_finalize_is_invalid_state() {
        let mut engine = Sha3::new(DigestSize::Sha3_256);
        engine.update(b"abc").unwrap();
        engine.finalize().unwrap();

        assert!(matches!(engine.update(b"more"), Err(CryptoError::InvalidState(_))));
        assert!(matches!(engine.update(b""), Err(CryptoError::InvalidState(_))));
    }

    #[test]
    fn finalize_twice_is_invalid_state() {
        let mut engine = Sha3::new(DigestSize::Sha3_512);
        engine.finalize().unwrap();
        assert!(engine.is_finalized());
        assert!(matches!(engine.finalize(), Err(CryptoError::InvalidState(_))));
    }

    #[test]
    fn reset_allows_reuse() {
        let mut engine = Sha3::new(DigestSize::Sha3_384);
        engine.update(b"first message").unwrap();
        let first = engine.finalize().unwrap();

        engine.reset();
        assert!(!engine.is_finalized());
        engine.update(b"abc").unwrap();
        let second = engine.finalize().unwrap();

        assert_ne!(first, second);
        assert_eq!(second, Sha3::digest(DigestSize::Sha3_384, b"abc"));
    }

    #[test]
    fn reset_discards_buffered_input() {
        let mut engine = Sha3::new(DigestSize::Sha3_256);
        engine.update(sample(200)).unwrap();
        engine.reset();
        assert_eq!(engine.finalize().unwrap(), Sha3::digest(DigestSize::Sha3_256, b""));
    }

    #[test]
    fn digest_length_is_fixed() {
        for size in DigestSize::ALL {
            for len in [0, 1, size.rate_bytes() - 1, size.rate_bytes(), 1000] {
                assert_eq!(Sha3::digest(size, sample(len)).len(), size.output_bytes());
            }
        }
    }

    #[test]
    fn chunking_does_not_change_digest() {
        for size in DigestSize::ALL {
            let rate = size.rate_bytes();
            let data = sample(3 * rate + 17);
            let expected = Sha3::digest(size, &data);

            for split in [1, 7, rate - 1, rate, rate + 1, 2 * rate] {
                let mut engine = Sha3::new(size);
                for chunk in data.chunks(split) {
                    engine.update(chunk).unwrap();
                }
                assert_eq!(engine.finalize().unwrap(), expected, "{size} split {split}");
            }

            let mut engine = Sha3::new(size);
            engine.update(&data[..5]).unwrap();
            engine.update(b"").unwrap();
            engine.update(&data[5..rate + 3]).unwrap();
            engine.update(&data[rate + 3..]).unwrap();
            assert_eq!(engine.finalize().unwrap(), expected);
        }
    }

    #[test]
    fn padding_when_one_byte_short_of_a_block() {
        // Buffered rate-1 bytes: the 0x06 and 0x80 marks merge into 0x86.
        for size in DigestSize::ALL {
            let rate = size.rate_bytes();
            let data = sample(rate - 1);

            let mut block = [0u8; MAX_RATE_BYTES];
            block[..rate - 1].copy_from_slice(&data);
            block[rate - 1] = 0x86;
            let mut state = KeccakState::new();
            state.absorb_block(&block[..rate]);
            let mut expected = vec![0u8; size.output_bytes()];
            state.squeeze_into(&mut expected);

            assert_eq!(Sha3::digest(size, &data).as_bytes(), &expected[..]);
        }
    }

    #[test]
    fn deterministic_across_instances() {
        let data = sample(500);
        for size in DigestSize::ALL {
            assert_eq!(Sha3::digest(size, &data), Sha3::digest(size, &data));
        }
    }

    #[test]
    fn single_bit_flip_avalanches() {
        let base = sample(32);
        let reference = Sha3::digest(DigestSize::Sha3_256, &base);
        let mut total_flipped = 0u32;
        let mut trials = 0u32;

        for byte in 0..base.len() {
            for bit in 0..8 {
                let mut flipped = base.clone();
                flipped[byte] ^= 1 << bit;
                let digest = Sha3::digest(DigestSize::Sha3_256, &flipped);
                assert_ne!(digest, reference);
                total_flipped += digest
                    .as_bytes()
                    .iter()
                    .zip(reference.as_bytes())
                    .map(|(a, b)| (a ^ b).count_ones())
                    .sum::<u32>();
                trials += 1;
            }
        }

        let ratio = total_flipped as f64 / (trials as f64 * 256.0);
        assert!((0.45..0.55).contains(&ratio), "avalanche ratio {ratio}");
    }

    #[test]
    fn hex_helpers() {
        assert_eq!(
            hash_hex(256, b"abc").unwrap(),
            "3A985DA74FE225B2045C172D6BD390BD855F086E3E9D525B46BFE24511431532"
        );
        assert_eq!(sha3_512_hex(""), Sha3::digest(DigestSize::Sha3_512, b"").to_hex());
        let digest = hash(224, b"").unwrap();
        assert_eq!(digest.to_string(), digest.to_hex());
        assert_eq!(format!("{digest:?}"), format!("Digest({})", digest.to_hex()));
    }
}
