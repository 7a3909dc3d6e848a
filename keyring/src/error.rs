use std::path::PathBuf;

use address::AddressError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyringError {
    #[error("{name}.info: key not found")]
    NotFound { name: String },
    #[error("invalid key name {0:?}")]
    InvalidName(String),
    #[error("failed to read key record {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed key record {}: {source}", path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("key {name} holds an invalid address: {source}")]
    Address {
        name: String,
        #[source]
        source: AddressError,
    },
}
