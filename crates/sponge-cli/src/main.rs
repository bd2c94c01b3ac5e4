mod check;
mod config;
mod sum;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use sponge_fs::ReadOptions;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, DEFAULT_CONFIG_FILE};

#[derive(Debug, Parser)]
#[command(name = "keccaksum", version, about = "Print or check Keccak sponge (SHAKE256) digests")]
struct Cli {
    /// Files to hash. With no FILE, or when FILE is -, read standard input
    files: Vec<PathBuf>,

    /// Digest length in bytes [default: 64, or `length` from the config]
    #[arg(short, long)]
    length: Option<usize>,

    /// Read digests and paths from LIST and verify them
    #[arg(short, long, value_name = "LIST", conflicts_with = "files")]
    check: Option<PathBuf>,

    /// Bytes per file read [default: 4096, or `chunk_size` from the config]
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Logs go to stderr so digests on stdout stay machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("keccaksum: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = load_config(cli.config.as_deref())?;
    let length = cli.length.unwrap_or(config.length);
    let options = ReadOptions::new().chunk_size(cli.chunk_size.unwrap_or(config.chunk_size));
    tracing::debug!(length, chunk_size = options.get_chunk_size(), "resolved settings");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.check {
        Some(list) => check::run(&list, options, &mut out),
        None => sum::run(&cli.files, length, options, &mut out),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            anyhow::ensure!(path.is_file(), "config file '{}' not found", path.display());
            Config::load(path).with_context(|| format!("invalid config '{}'", path.display()))
        }
        None => Config::load(Path::new(DEFAULT_CONFIG_FILE)).context("invalid default config"),
    }
}
