use std::io::{self, Read};

use crate::{Error, Hasher, Result};

/// Streaming reader that hashes data as it passes through.
/// Wraps any `Read` source so content is hashed in the same pass that copies it.
pub struct VerifiedReader<R, H> {
    reader: R,
    hasher: H,
}

impl<R, H> VerifiedReader<R, H> {
    pub fn new(reader: R, hasher: H) -> Self { Self { reader, hasher } }
}

impl<R: Read, H: Hasher> Read for VerifiedReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if n > 0 {
            self.hasher.update(&buf[..n]);
        }
        Ok(n)
    }
}

impl<R: Read, H: Hasher> VerifiedReader<R, H> {
    /// Digest of everything read so far.
    pub fn into_digest(self) -> Vec<u8> { self.hasher.finalize() }

    /// Finalize verification against expected digest.
    /// Returns error on mismatch.
    pub fn finish(self, expected: &[u8]) -> Result<()> {
        let actual = self.hasher.finalize();
        if actual == expected {
            Ok(())
        } else {
            Err(Error::Mismatch {
                expected: hex::encode(expected),
                actual:   hex::encode(actual),
            })
        }
    }
}
