use std::{num::ParseIntError, path::PathBuf};

use address::AddressError;
use core_types::errors::CoinsError;
use keyring::KeyringError;
use thiserror::Error;

use crate::error::WasmError;

/// Failure to decode the salt positional of `instantiate2`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SaltError {
    #[error("multiple decoding flags used")]
    MultipleEncodings,
    #[error("{0}")]
    Hex(#[from] hex::FromHexError),
    #[error("{0}")]
    Base64(#[from] base64::DecodeError),
}

/// Errors raised while turning command line input into a message.
#[derive(Error, Debug)]
pub enum TxParseError {
    #[error("invalid code id {raw:?}: {source}")]
    CodeId {
        raw: String,
        #[source]
        source: ParseIntError,
    },
    #[error("amount: {0}")]
    Amount(#[source] CoinsError),
    #[error("max funds: {0}")]
    MaxFunds(#[source] CoinsError),
    #[error("label is required on all contracts")]
    LabelRequired,
    #[error(
        "you must set an admin or explicitly pass --no-admin to make it immutable (wasmd issue #719)"
    )]
    AdminRequired,
    #[error("you set an admin and passed --no-admin, those cannot both be true")]
    AdminConflict,
    #[error("admin {0}")]
    Admin(#[source] KeyringError),
    #[error("from {0}")]
    Sender(#[source] KeyringError),
    #[error("salt: {0}")]
    Salt(#[from] SaltError),
    #[error("parse {raw:?}: {source}")]
    AnyOfAddress {
        raw: String,
        #[source]
        source: AddressError,
    },
    #[error("not supported anymore. Use: instantiate-anyof-addresses")]
    OnlyAddressRemoved,
    #[error("invalid {field} address {raw:?}: {source}")]
    Address {
        field: &'static str,
        raw: String,
        #[source]
        source: AddressError,
    },
    #[error("expiration must be set")]
    ExpirationRequired,
    #[error("expiration {0} is out of range")]
    Expiration(i64),
    #[error("invalid limit setup")]
    InvalidLimit,
    #[error("cannot set more than one filter within one grant")]
    MultipleFilters,
    #[error("invalid filter setup")]
    InvalidFilter,
    #[error("{0} authorization type not supported")]
    UnsupportedAuthorization(String),
    #[error("invalid format")]
    InvalidGrantFormat,
    #[error("unable to parse address {raw:?}: {source}")]
    PolicyAddress {
        raw: String,
        #[source]
        source: AddressError,
    },
    #[error("invalid input file. Use wasm binary or gzip")]
    InvalidWasmFile,
    #[error("failed to gzip wasm code: {0}")]
    Compress(#[source] std::io::Error),
    #[error("failed to read {}: {source}", path.display())]
    ReadWasm {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Validation(#[from] WasmError),
}

/// Coarse classification of [`TxParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Text that does not parse as the expected type.
    MalformedInput,
    MissingRequired,
    ConflictingFlags,
    UnsupportedValue,
    /// A key name that the keyring cannot resolve.
    ResolutionFailure,
    /// The assembled message failed `validate_basic`.
    StructuralValidation,
}

impl TxParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TxParseError::CodeId { .. }
            | TxParseError::Amount(_)
            | TxParseError::MaxFunds(_)
            | TxParseError::AnyOfAddress { .. }
            | TxParseError::Address { .. }
            | TxParseError::Expiration(_)
            | TxParseError::InvalidGrantFormat
            | TxParseError::PolicyAddress { .. }
            | TxParseError::InvalidWasmFile
            | TxParseError::ReadWasm { .. }
            | TxParseError::Compress(_) => ErrorKind::MalformedInput,
            TxParseError::Salt(SaltError::MultipleEncodings) => ErrorKind::ConflictingFlags,
            TxParseError::Salt(_) => ErrorKind::MalformedInput,
            TxParseError::LabelRequired
            | TxParseError::AdminRequired
            | TxParseError::ExpirationRequired
            | TxParseError::InvalidFilter => ErrorKind::MissingRequired,
            TxParseError::AdminConflict
            | TxParseError::InvalidLimit
            | TxParseError::MultipleFilters => ErrorKind::ConflictingFlags,
            TxParseError::UnsupportedAuthorization(_) | TxParseError::OnlyAddressRemoved => {
                ErrorKind::UnsupportedValue
            }
            TxParseError::Admin(_) | TxParseError::Sender(_) => ErrorKind::ResolutionFailure,
            TxParseError::Validation(_) => ErrorKind::StructuralValidation,
        }
    }
}
