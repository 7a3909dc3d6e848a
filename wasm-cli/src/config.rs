//! Client configuration stored as `config.toml` in the home directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_HOME_DIR: &str = ".wasmcli";
const DEFAULT_KEYRING_DIR: &str = "keyring";

/// `~/.wasmcli`, or `.wasmcli` in the working directory when there is no
/// home directory.
pub fn default_home() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_HOME_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME_DIR))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Directory holding key records. Relative paths are resolved against the
    /// home directory.
    pub keyring_dir: Option<PathBuf>,
    pub chain_id: Option<String>,
    pub output: OutputFormat,
}

impl ClientConfig {
    /// Read `<home>/config.toml`. A missing file yields the defaults.
    pub fn load(home: &Path) -> anyhow::Result<Self> {
        let path = home.join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn keyring_dir(&self, home: &Path) -> PathBuf {
        match &self.keyring_dir {
            Some(dir) => home.join(dir),
            None => home.join(DEFAULT_KEYRING_DIR),
        }
    }
}
