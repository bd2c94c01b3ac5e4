use std::io;

use crate::sponge::{Operation, Phase};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid state: cannot {operation} while {phase}")]
    InvalidState { operation: Operation, phase: Phase },

    #[error(transparent)]
    File(#[from] sponge_fs::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("digest mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },
}

impl Error {
    pub fn is_invalid_state(&self) -> bool { matches!(self, Self::InvalidState { .. }) }

    /// True for both file-source and generic reader failures.
    pub fn is_io(&self) -> bool { matches!(self, Self::File(_) | Self::Io(_)) }
}

pub type Result<T> = std::result::Result<T, Error>;
