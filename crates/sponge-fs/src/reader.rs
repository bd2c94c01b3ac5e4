use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const DEFAULT_CHUNK_SIZE: usize = 4096;

#[derive(Clone, Copy, Debug)]
pub struct ReadOptions {
    chunk_size: usize,
}

impl Default for ReadOptions {
    fn default() -> Self { Self::new() }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Zero is treated as one byte per read.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn get_chunk_size(&self) -> usize { self.chunk_size }
}

/// Exclusive, forward-only reader over a single file.
///
/// The handle lives exactly as long as the reader: dropping it on any path,
/// including an early return after a failed read, closes the file once.
pub struct SequentialReader {
    path:     PathBuf,
    file:     File,
    buf:      Vec<u8>,
    consumed: u64,
    eof:      bool,
}

impl SequentialReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(path, ReadOptions::new())
    }

    pub fn with_options(path: impl AsRef<Path>, options: ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            path = %path.display(),
            chunk_size = options.get_chunk_size(),
            "opened file for sequential read"
        );

        Ok(Self {
            path: path.to_path_buf(),
            file,
            buf: vec![0; options.get_chunk_size()],
            consumed: 0,
            eof: false,
        })
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Total bytes handed out so far.
    pub fn consumed(&self) -> u64 { self.consumed }

    pub fn is_eof(&self) -> bool { self.eof }

    /// Returns the next chunk, or `None` once end-of-stream is reached.
    ///
    /// Interrupted reads are retried; any other I/O failure is reported with
    /// the file path attached.
    pub fn next_chunk(&mut self) -> Result<Option<&[u8]>> {
        if self.eof {
            return Ok(None);
        }

        loop {
            match self.file.read(&mut self.buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(None);
                }
                Ok(n) => {
                    self.consumed += n as u64;
                    return Ok(Some(&self.buf[..n]));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(Error::Read {
                        path: self.path.clone(),
                        source,
                    });
                }
            }
        }
    }

    /// Feeds every chunk to `f` until end-of-stream, consuming the reader.
    ///
    /// Stops at the first error from either the file or `f`; the handle is
    /// released before the error reaches the caller.
    pub fn try_for_each_chunk<F, E>(mut self, mut f: F) -> std::result::Result<u64, E>
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E>,
        E: From<Error>,
    {
        while let Some(chunk) = self.next_chunk()? {
            f(chunk)?;
        }
        Ok(self.consumed)
    }
}

/// Plain byte-stream access for adapters that expect [`Read`]. A single call
/// never reads more than the configured chunk size. Errors are returned
/// without the path attached.
impl Read for SequentialReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.eof {
            return Ok(0);
        }
        let cap = buf.len().min(self.buf.len());
        let n = self.file.read(&mut buf[..cap])?;
        if n == 0 {
            self.eof = true;
        }
        self.consumed += n as u64;
        Ok(n)
    }
}

impl Drop for SequentialReader {
    fn drop(&mut self) {
        tracing::trace!(
            path = %self.path.display(),
            consumed = self.consumed,
            eof = self.eof,
            "released file handle"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_options_clamps_zero() {
        assert_eq!(ReadOptions::new().chunk_size(0).get_chunk_size(), 1);
        assert_eq!(ReadOptions::default().get_chunk_size(), DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_next_chunk_respects_chunk_size() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, [7u8; 10]).unwrap();

        let mut reader = SequentialReader::with_options(&path, ReadOptions::new().chunk_size(4))?;
        let mut sizes = Vec::new();
        while let Some(chunk) = reader.next_chunk()? {
            assert!(chunk.iter().all(|&b| b == 7));
            sizes.push(chunk.len());
        }

        assert_eq!(sizes.iter().sum::<usize>(), 10);
        assert!(sizes.iter().all(|&n| n <= 4));
        assert!(reader.is_eof());
        assert_eq!(reader.consumed(), 10);
        assert!(reader.next_chunk()?.is_none());
        Ok(())
    }

    #[test]
    fn test_read_impl_tracks_consumed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, b"abcdef").unwrap();

        let mut reader = SequentialReader::open(&path).unwrap();
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();

        assert_eq!(out, b"abcdef");
        assert_eq!(reader.consumed(), 6);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_read_impl_caps_at_chunk_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, [3u8; 100]).unwrap();

        let mut reader = SequentialReader::with_options(&path, ReadOptions::new().chunk_size(7)).unwrap();
        let mut buf = [0u8; 8192];
        let mut sizes = Vec::new();
        loop {
            let n = reader.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            sizes.push(n);
        }

        assert_eq!(sizes.iter().sum::<usize>(), 100);
        assert!(sizes.iter().all(|&n| n <= 7));
        assert_eq!(reader.consumed(), 100);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.bin");

        let err = SequentialReader::open(&path).err().unwrap();
        assert!(matches!(err, Error::Open { .. }));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn test_try_for_each_chunk_stops_on_callback_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, [1u8; 32]).unwrap();

        #[derive(Debug)]
        enum Stop {
            Early,
            Fs,
        }

        impl From<Error> for Stop {
            fn from(_: Error) -> Self { Stop::Fs }
        }

        let reader = SequentialReader::with_options(&path, ReadOptions::new().chunk_size(8)).unwrap();
        let mut calls = 0;
        let result = reader.try_for_each_chunk(|_| {
            calls += 1;
            if calls == 2 { Err(Stop::Early) } else { Ok(()) }
        });

        assert!(matches!(result, Err(Stop::Early)));
        assert_eq!(calls, 2);
    }
}
