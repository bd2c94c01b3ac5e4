use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::permutation::{LANES, keccak_f1600};
use crate::{Error, Result};

/// Bytes exchanged with the caller per permutation.
pub const RATE: usize = 136;
/// Bytes reserved for the permutation alone.
pub const CAPACITY: usize = 64;
pub const STATE_BYTES: usize = RATE + CAPACITY;

const DOMAIN_PAD: u8 = 0x1f;
const FINAL_PAD: u8 = 0x80;

const _: () = assert!(STATE_BYTES == LANES * 8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Absorbing,
    Squeezing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absorbing => f.write_str("absorbing"),
            Self::Squeezing => f.write_str("squeezing"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Absorb,
    Finalize,
    Squeeze,
}

impl Operation {
    fn required_phase(self) -> Phase {
        match self {
            Self::Absorb | Self::Finalize => Phase::Absorbing,
            Self::Squeeze => Phase::Squeezing,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absorb => f.write_str("absorb"),
            Self::Finalize => f.write_str("finalize"),
            Self::Squeeze => f.write_str("squeeze"),
        }
    }
}

/// Keccak sponge with a 136-byte rate and `0x1f` domain padding.
///
/// The state starts out absorbing. [`finalize`](Sponge::finalize) pads and
/// switches to squeezing exactly once; only [`reset`](Sponge::reset) returns to
/// absorbing. Calls made in the wrong phase return [`Error::InvalidState`] and
/// leave the state untouched.
///
/// Output length is chosen per [`squeeze`](Sponge::squeeze) call and squeezing
/// may continue indefinitely, so the sponge acts as an extendable-output
/// function rather than a fixed-size digest.
///
/// ```
/// use sponge_keccak::Sponge;
///
/// let mut sponge = Sponge::new();
/// sponge.absorb(b"hello ")?;
/// sponge.absorb(b"world")?;
/// sponge.finalize()?;
/// let head = sponge.squeeze(32)?;
/// let tail = sponge.squeeze(32)?;
///
/// assert_eq!([head, tail].concat(), sponge_keccak::hash_bytes(b"hello world", 64));
/// # Ok::<(), sponge_keccak::Error>(())
/// ```
#[derive(Clone)]
pub struct Sponge {
    lanes:  [u64; LANES],
    cursor: usize,
    phase:  Phase,
}

impl Default for Sponge {
    fn default() -> Self { Self::new() }
}

impl fmt::Debug for Sponge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sponge")
            .field("cursor", &self.cursor)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl Sponge {
    pub fn new() -> Self {
        Self {
            lanes:  [0; LANES],
            cursor: 0,
            phase:  Phase::Absorbing,
        }
    }

    pub fn phase(&self) -> Phase { self.phase }

    /// Offset into the rate region where the next byte is absorbed or read.
    pub fn cursor(&self) -> usize { self.cursor }

    /// Returns to the zeroed absorbing state without reallocating.
    pub fn reset(&mut self) {
        self.lanes.zeroize();
        self.cursor = 0;
        self.phase = Phase::Absorbing;
    }

    pub fn absorb(&mut self, data: &[u8]) -> Result<()> {
        self.check(Operation::Absorb)?;
        self.absorb_unchecked(data);
        Ok(())
    }

    pub fn finalize(&mut self) -> Result<()> {
        self.check(Operation::Finalize)?;
        self.finalize_unchecked();
        Ok(())
    }

    pub fn squeeze(&mut self, length: usize) -> Result<Vec<u8>> {
        self.check(Operation::Squeeze)?;
        let mut out = vec![0; length];
        self.squeeze_unchecked(&mut out);
        Ok(out)
    }

    /// Fills `out` completely, continuing where the previous squeeze stopped.
    pub fn squeeze_into(&mut self, out: &mut [u8]) -> Result<()> {
        self.check(Operation::Squeeze)?;
        self.squeeze_unchecked(out);
        Ok(())
    }

    fn check(&self, operation: Operation) -> Result<()> {
        if self.phase == operation.required_phase() {
            Ok(())
        } else {
            Err(Error::InvalidState {
                operation,
                phase: self.phase,
            })
        }
    }

    pub(crate) fn absorb_unchecked(&mut self, mut data: &[u8]) {
        debug_assert_eq!(self.phase, Phase::Absorbing);

        while !data.is_empty() {
            let take = (RATE - self.cursor).min(data.len());
            let (block, rest) = data.split_at(take);
            for (i, &byte) in block.iter().enumerate() {
                let offset = self.cursor + i;
                self.xor_byte(offset, byte);
            }
            self.advance(take);
            data = rest;
        }
    }

    pub(crate) fn finalize_unchecked(&mut self) {
        debug_assert_eq!(self.phase, Phase::Absorbing);

        // Both land on byte 135 when the cursor is already there.
        self.xor_byte(self.cursor, DOMAIN_PAD);
        self.xor_byte(RATE - 1, FINAL_PAD);
        keccak_f1600(&mut self.lanes);
        self.cursor = 0;
        self.phase = Phase::Squeezing;
    }

    pub(crate) fn squeeze_unchecked(&mut self, mut out: &mut [u8]) {
        debug_assert_eq!(self.phase, Phase::Squeezing);

        while !out.is_empty() {
            let take = (RATE - self.cursor).min(out.len());
            let (block, rest) = std::mem::take(&mut out).split_at_mut(take);
            for (i, byte) in block.iter_mut().enumerate() {
                *byte = self.byte(self.cursor + i);
            }
            self.advance(take);
            out = rest;
        }
    }

    // Keeps the cursor strictly inside the rate by permuting as soon as it fills.
    fn advance(&mut self, n: usize) {
        self.cursor += n;
        if self.cursor == RATE {
            keccak_f1600(&mut self.lanes);
            self.cursor = 0;
        }
    }

    fn xor_byte(&mut self, offset: usize, byte: u8) {
        debug_assert!(offset < RATE);
        self.lanes[offset / 8] ^= u64::from(byte) << (8 * (offset % 8));
    }

    fn byte(&self, offset: usize) -> u8 {
        debug_assert!(offset < RATE);
        (self.lanes[offset / 8] >> (8 * (offset % 8))) as u8
    }

    #[cfg(test)]
    pub(crate) fn state_bytes(&self) -> [u8; STATE_BYTES] {
        let mut bytes = [0u8; STATE_BYTES];
        for (chunk, lane) in bytes.chunks_exact_mut(8).zip(self.lanes.iter()) {
            chunk.copy_from_slice(&lane.to_le_bytes());
        }
        bytes
    }
}

impl Zeroize for Sponge {
    fn zeroize(&mut self) { self.reset(); }
}

impl Drop for Sponge {
    fn drop(&mut self) {
        self.lanes.zeroize();
        self.cursor.zeroize();
    }
}

impl ZeroizeOnDrop for Sponge {}
