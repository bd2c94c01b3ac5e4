use std::io::{self, Read};
use std::path::Path;

use sponge_fs::{ReadOptions, SequentialReader};

use crate::typestate::Absorber;
use crate::{Error, Result};

/// Hashes `data` with a fresh sponge and returns `length` output bytes.
pub fn hash_bytes(data: &[u8], length: usize) -> Vec<u8> {
    let mut absorber = Absorber::new();
    absorber.absorb(data);
    absorber.finalize().squeeze(length)
}

/// Drains `reader` into a fresh sponge.
///
/// Nothing is returned if the reader fails; bytes absorbed before the failure
/// are discarded along with the sponge.
pub fn hash_reader<R: Read>(mut reader: R, length: usize) -> Result<Vec<u8>> {
    let mut absorber = Absorber::new();
    let absorbed = io::copy(&mut reader, &mut absorber)?;
    tracing::trace!(absorbed, length, "hashed reader");
    Ok(absorber.finalize().squeeze(length))
}

pub fn hash_file(path: impl AsRef<Path>, length: usize) -> Result<Vec<u8>> {
    hash_file_with(path, length, ReadOptions::new())
}

/// Streams a file through a fresh sponge in `options`-sized chunks.
///
/// The file handle is released before this returns, on success and on every
/// error path.
pub fn hash_file_with(
    path: impl AsRef<Path>,
    length: usize,
    options: ReadOptions,
) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let reader = SequentialReader::with_options(path, options)?;

    let mut absorber = Absorber::new();
    let absorbed = reader.try_for_each_chunk(|chunk| {
        absorber.absorb(chunk);
        Ok::<_, Error>(())
    })?;

    tracing::debug!(path = %path.display(), absorbed, length, "hashed file");
    Ok(absorber.finalize().squeeze(length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use tempfile::tempdir;

    #[test]
    fn test_hash_bytes_known_answers() {
        assert_eq!(
            hash_bytes(b"", 64),
            hex!(
                "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f"
                "d75dc4ddd8c0f200cb05019d67b592f6fc821c49479ab48640292eacb3b7c4be"
            )
        );
        assert_eq!(
            hash_bytes(b"abc", 32),
            hex!("483366601360a8771c6863080cc4114d8db44530f8f1e1ee4f94ea37e78b5739")
        );
    }

    #[test]
    fn test_zero_length_output() {
        assert!(hash_bytes(b"anything", 0).is_empty());
    }

    #[test]
    fn test_hash_file_matches_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.bin");
        let content: Vec<u8> = (0..5000u32).map(|i| (i * 7 % 256) as u8).collect();
        std::fs::write(&path, &content).unwrap();

        assert_eq!(hash_file(&path, 64).unwrap(), hash_bytes(&content, 64));
        for chunk_size in [1, 135, 136, 137, 4096] {
            let options = ReadOptions::new().chunk_size(chunk_size);
            assert_eq!(
                hash_file_with(&path, 40, options).unwrap(),
                hash_bytes(&content, 40),
                "chunk size {chunk_size}"
            );
        }
    }

    #[test]
    fn test_hash_file_missing_path() {
        let dir = tempdir().unwrap();
        let err = hash_file(dir.path().join("nope"), 32).unwrap_err();

        assert!(err.is_io());
        assert!(matches!(err, Error::File(sponge_fs::Error::Open { .. })));
    }

    struct FailAfter {
        remaining: usize,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::other("device went away"));
            }
            let n = buf.len().min(self.remaining);
            buf[..n].fill(0xab);
            self.remaining -= n;
            Ok(n)
        }
    }

    #[test]
    fn test_hash_reader_propagates_mid_stream_failure() {
        let err = hash_reader(FailAfter { remaining: 1000 }, 32).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_hash_reader_matches_bytes() {
        let data = vec![0x42u8; 10_000];
        assert_eq!(hash_reader(&data[..], 48).unwrap(), hash_bytes(&data, 48));
    }
}
