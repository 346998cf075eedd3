//! Keccak-f[1600] permutation and sponge state.
//!
//! The state is 25 lanes of 64 bits arranged as a 5×5 matrix; lane `(x, y)`
//! lives at index `x + 5*y`. Bytes enter and leave the state in
//! little-endian order within each lane, so the flattened byte view matches
//! FIPS 202.

#![forbid(unsafe_code)]

use core::fmt;

use zeroize::Zeroize;

/// Number of 64-bit lanes in the state.
pub const LANES: usize = 25;

/// State width in bytes (1600 bits).
pub const STATE_BYTES: usize = LANES * 8;

/// Rounds per permutation call.
pub const ROUNDS: usize = 24;

/// Iota round constants, one per round.
pub const ROUND_CONSTANTS: [u64; ROUNDS] = [
    0x0000000000000001, 0x0000000000008082, 0x800000000000808A, 0x8000000080008000,
    0x000000000000808B, 0x0000000080000001, 0x8000000080008081, 0x8000000000008009,
    0x000000000000008A, 0x0000000000000088, 0x0000000080008009, 0x000000008000000A,
    0x000000008000808B, 0x800000000000008B, 0x8000000000008089, 0x8000000000008003,
    0x8000000000008002, 0x8000000000000080, 0x000000000000800A, 0x800000008000000A,
    0x8000000080008081, 0x8000000000008080, 0x0000000080000001, 0x8000000080008008,
];

/// Rho rotation amounts, indexed like the state (`x + 5*y`).
#[rustfmt::skip]
const RHO_OFFSETS: [u32; LANES] = [
     0,  1, 62, 28, 27,
    36, 44,  6, 55, 20,
     3, 10, 43, 25, 39,
    41, 45, 15, 21,  8,
    18,  2, 61, 56, 14,
];

#[inline(always)]
const fn index(x: usize, y: usize) -> usize {
    x + 5 * y
}

/* ============================================================================
 * Permutation steps
 * ========================================================================== */

/// Column parity diffusion.
#[inline(always)]
fn theta(a: &mut [u64; LANES]) {
    let mut c = [0u64; 5];
    for (x, parity) in c.iter_mut().enumerate() {
        *parity = a[index(x, 0)] ^ a[index(x, 1)] ^ a[index(x, 2)] ^ a[index(x, 3)] ^ a[index(x, 4)];
    }
    for x in 0..5 {
        let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
        for y in 0..5 {
            a[index(x, y)] ^= d;
        }
    }
}

#[inline(always)]
fn rho(a: &mut [u64; LANES]) {
    for (lane, &offset) in a.iter_mut().zip(RHO_OFFSETS.iter()) {
        *lane = lane.rotate_left(offset);
    }
}

/// Lane `(x, y)` moves to `(y, 2x + 3y)`.
#[inline(always)]
fn pi(a: &[u64; LANES]) -> [u64; LANES] {
    let mut b = [0u64; LANES];
    for y in 0..5 {
        for x in 0..5 {
            b[index(y, (2 * x + 3 * y) % 5)] = a[index(x, y)];
        }
    }
    b
}

#[inline(always)]
fn chi(a: &mut [u64; LANES], b: &[u64; LANES]) {
    for y in 0..5 {
        for x in 0..5 {
            a[index(x, y)] =
                b[index(x, y)] ^ (!b[index((x + 1) % 5, y)] & b[index((x + 2) % 5, y)]);
        }
    }
}

#[inline(always)]
fn iota(a: &mut [u64; LANES], round_constant: u64) {
    a[0] ^= round_constant;
}

/// Keccak-f[1600]: 24 rounds of theta, rho, pi, chi, iota.
pub fn keccak_f1600(a: &mut [u64; LANES]) {
    for &rc in ROUND_CONSTANTS.iter() {
        theta(a);
        rho(a);
        let b = pi(a);
        chi(a, &b);
        iota(a, rc);
    }
}

/* ============================================================================
 * Sponge state
 * ========================================================================== */

/// 1600-bit Keccak state owned by a single sponge.
#[derive(Clone, Default, PartialEq, Eq, Zeroize)]
pub struct KeccakState {
    lanes: [u64; LANES],
}

impl KeccakState {
    /// All-zero state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lanes(&self) -> &[u64; LANES] {
        &self.lanes
    }

    pub fn permute(&mut self) {
        keccak_f1600(&mut self.lanes);
    }

    /// XOR `block` onto the leading bytes of the state, then permute.
    ///
    /// `block.len()` must be a multiple of 8 and at most [`STATE_BYTES`].
    pub fn absorb_block(&mut self, block: &[u8]) {
        debug_assert!(block.len() % 8 == 0 && block.len() <= STATE_BYTES);
        for (b, lane) in block.chunks_exact(8).zip(self.lanes.iter_mut()) {
            *lane ^= u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]);
        }
        self.permute();
    }

    /// Copy the leading `out.len()` bytes of the flattened state into `out`.
    pub fn squeeze_into(&self, out: &mut [u8]) {
        debug_assert!(out.len() <= STATE_BYTES);
        for (chunk, lane) in out.chunks_mut(8).zip(self.lanes.iter()) {
            let bytes = lane.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl fmt::Debug for KeccakState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeccakState { .. }")
    }
}
