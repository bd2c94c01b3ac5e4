//! Keccak-f\[1600\] sponge with extendable output.
//!
//! The sponge uses a 136-byte rate, a 64-byte capacity and `0x1f` domain
//! padding, i.e. the SHAKE256 parameterization. Output length is always chosen
//! by the caller.
//!
//! # Layers
//!
//! - [`keccak_f1600`]: the bare permutation over 25 little-endian lanes.
//! - [`Sponge`]: runtime-checked absorb/finalize/squeeze state machine.
//! - [`Absorber`] / [`Squeezer`]: the same machine with phases in the type.
//! - [`hash_bytes`], [`hash_reader`], [`hash_file`]: one-shot helpers.
//! - [`Hasher`] and [`VerifiedReader`]: hash while copying, then compare.
//!
//! # Example
//!
//! ```
//! use sponge_keccak::{Sponge, hash_bytes};
//!
//! let mut sponge = Sponge::new();
//! sponge.absorb(b"streamed ")?;
//! sponge.absorb(b"input")?;
//! sponge.finalize()?;
//!
//! assert_eq!(sponge.squeeze(32)?, hash_bytes(b"streamed input", 32));
//! assert!(sponge.absorb(b"too late").is_err());
//! # Ok::<(), sponge_keccak::Error>(())
//! ```

pub use self::error::{Error, Result};
pub use self::hasher::{DEFAULT_OUTPUT_LEN, Hasher, KeccakHasher};
pub use self::oneshot::{hash_bytes, hash_file, hash_file_with, hash_reader};
pub use self::permutation::{LANES, ROUNDS, keccak_f1600};
pub use self::reader::VerifiedReader;
pub use self::sponge::{CAPACITY, Operation, Phase, RATE, STATE_BYTES, Sponge};
pub use self::typestate::{Absorber, Squeezer};
pub use sponge_fs::ReadOptions;

mod error;
mod hasher;
mod oneshot;
mod permutation;
mod reader;
mod sponge;
mod typestate;
