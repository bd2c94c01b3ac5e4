use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use sponge_fs::DEFAULT_CHUNK_SIZE;
use sponge_keccak::DEFAULT_OUTPUT_LEN;

pub const DEFAULT_CONFIG_FILE: &str = "keccaksum.toml";
pub const ENV_PREFIX: &str = "KECCAKSUM_";

/// Settings layered as defaults < TOML file < `KECCAKSUM_*` environment.
/// Command-line flags are applied on top by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Digest length in bytes.
    pub length:     usize,
    /// Bytes per file read.
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            length:     DEFAULT_OUTPUT_LEN,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file_exact(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Only `path` itself is consulted, never a same-named file in a parent
    /// directory. A missing file contributes nothing; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, figment::Error> { Self::figment(path).extract() }
}
