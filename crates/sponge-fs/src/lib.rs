//! Sequential file sources for the sponge hashers.
//!
//! This crate is the only place the workspace touches the filesystem. It opens
//! a path for exclusive forward-only reading and hands out fixed-size chunks
//! until end-of-stream. Handles are scoped to [`SequentialReader`], so they are
//! released exactly once whether hashing finishes or fails partway through.
//!
//! # Example
//!
//! ```no_run
//! use sponge_fs::{ReadOptions, SequentialReader};
//!
//! let reader = SequentialReader::with_options("artifact.tar", ReadOptions::new().chunk_size(8192))?;
//! let total = reader.try_for_each_chunk(|chunk| {
//!     println!("{} bytes", chunk.len());
//!     Ok::<_, sponge_fs::Error>(())
//! })?;
//! println!("read {total} bytes");
//! # Ok::<(), sponge_fs::Error>(())
//! ```

pub use self::error::{Error, Result};
pub use self::reader::{DEFAULT_CHUNK_SIZE, ReadOptions, SequentialReader};

mod error;
mod reader;
