use std::borrow::Cow;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sponge_fs::ReadOptions;
use sponge_keccak::{hash_file_with, hash_reader};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    pub fn from_arg(arg: &Path) -> Self {
        if arg == Path::new("-") { Self::Stdin } else { Self::File(arg.to_path_buf()) }
    }

    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Stdin => Cow::Borrowed("-"),
            Self::File(path) => path.to_string_lossy(),
        }
    }

    pub fn digest(&self, length: usize, options: ReadOptions) -> sponge_keccak::Result<Vec<u8>> {
        match self {
            Self::Stdin => hash_reader(io::stdin().lock(), length),
            Self::File(path) => hash_file_with(path, length, options),
        }
    }
}

/// No arguments means standard input.
pub fn inputs(args: &[PathBuf]) -> Vec<Input> {
    if args.is_empty() {
        vec![Input::Stdin]
    } else {
        args.iter().map(|arg| Input::from_arg(arg)).collect()
    }
}

pub fn format_line(digest: &[u8], name: &str) -> String { format!("{}  {}", hex::encode(digest), name) }

/// Prints one line per input. Returns `false` if any input could not be hashed;
/// the remaining inputs are still processed.
pub fn run<W: Write>(
    args: &[PathBuf],
    length: usize,
    options: ReadOptions,
    out: &mut W,
) -> anyhow::Result<bool> {
    let mut ok = true;

    for input in inputs(args) {
        match input.digest(length, options) {
            Ok(digest) => writeln!(out, "{}", format_line(&digest, &input.name()))?,
            Err(err) => {
                tracing::debug!(input = %input.name(), error = %err, "hashing failed");
                eprintln!("keccaksum: {}: {err}", input.name());
                ok = false;
            }
        }
    }

    Ok(ok)
}
