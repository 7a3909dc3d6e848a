use std::path::{Path, PathBuf};

use address::AccAddress;
use serde::{Deserialize, Serialize};

use crate::{KeyLookup, KeyringError};

/// Public part of a stored key as written to `<name>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub name: String,
    pub address: String,
}

/// Keyring backed by a directory holding one JSON record per key.
#[derive(Debug, Clone)]
pub struct FileKeyring {
    dir: PathBuf,
}

impl FileKeyring {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, name: &str) -> Result<PathBuf, KeyringError> {
        // names map straight onto file names
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(KeyringError::InvalidName(name.to_owned()));
        }

        Ok(self.dir.join(format!("{name}.json")))
    }
}

impl KeyLookup for FileKeyring {
    fn resolve(&self, name: &str) -> Result<AccAddress, KeyringError> {
        let path = self.record_path(name)?;

        let raw = match std::fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(KeyringError::NotFound {
                    name: name.to_owned(),
                })
            }
            Err(source) => return Err(KeyringError::Io { path, source }),
        };

        let record: KeyRecord = serde_json::from_slice(&raw)
            .map_err(|source| KeyringError::Record { path, source })?;

        tracing::debug!("resolved key {} from {}", record.name, self.dir.display());

        AccAddress::from_bech32(&record.address).map_err(|source| KeyringError::Address {
            name: name.to_owned(),
            source,
        })
    }
}
