use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use sponge_fs::{ReadOptions, SequentialReader};
use sponge_keccak::{KeccakHasher, VerifiedReader};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub expected: Vec<u8>,
    pub path:     PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: expected '<hex digest>  <path>'")]
    Malformed { line: usize },

    #[error("line {line}: digest is not valid hex")]
    BadHex { line: usize },
}

/// Parses `<hex>  <path>` (text mode) or `<hex> *<path>` (binary mode).
/// Blank lines and `#` comments yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Entry>, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let malformed = ParseError::Malformed { line: line_no };
    let (digest, rest) = line.split_once(' ').ok_or(malformed.clone())?;
    let path = rest.strip_prefix([' ', '*']).unwrap_or(rest);
    if digest.is_empty() || path.is_empty() {
        return Err(malformed);
    }

    let expected = hex::decode(digest).map_err(|_| ParseError::BadHex { line: line_no })?;
    Ok(Some(Entry {
        expected,
        path: PathBuf::from(path),
    }))
}

/// Hashes the file at the digest's own length and compares.
/// Each read is bounded by `options`' chunk size.
pub fn verify(entry: &Entry, options: ReadOptions) -> sponge_keccak::Result<()> {
    let reader = SequentialReader::with_options(&entry.path, options)?;
    verify_source(reader, &entry.expected)
}

fn verify_source<R: Read>(source: R, expected: &[u8]) -> sponge_keccak::Result<()> {
    let mut verified = VerifiedReader::new(source, KeccakHasher::new(expected.len()));
    io::copy(&mut verified, &mut io::sink())?;
    verified.finish(expected)
}

/// Verifies every entry in `list`. Returns `false` if any digest failed or
/// any line could not be parsed.
pub fn run<W: Write>(list: &Path, options: ReadOptions, out: &mut W) -> anyhow::Result<bool> {
    let content = std::fs::read_to_string(list)
        .with_context(|| format!("failed to read check list '{}'", list.display()))?;

    let mut failed = 0usize;
    let mut malformed = 0usize;

    for (i, line) in content.lines().enumerate() {
        let entry = match parse_line(i + 1, line) {
            Ok(Some(entry)) => entry,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("keccaksum: {}: {err}", list.display());
                malformed += 1;
                continue;
            }
        };

        match verify(&entry, options) {
            Ok(()) => writeln!(out, "{}: OK", entry.path.display())?,
            Err(err) if err.is_io() => {
                tracing::debug!(path = %entry.path.display(), error = %err, "could not read");
                writeln!(out, "{}: FAILED open or read", entry.path.display())?;
                failed += 1;
            }
            Err(err) => {
                tracing::debug!(path = %entry.path.display(), error = %err, "digest differs");
                writeln!(out, "{}: FAILED", entry.path.display())?;
                failed += 1;
            }
        }
    }

    if failed > 0 {
        eprintln!("keccaksum: WARNING: {failed} computed digest(s) did NOT match");
    }
    if malformed > 0 {
        eprintln!("keccaksum: WARNING: {malformed} line(s) are improperly formatted");
    }

    Ok(failed == 0 && malformed == 0)
}
