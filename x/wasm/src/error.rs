//! Error definitions for the wasm module.
//!
//! [`WasmError`] is what structural validation (`validate_basic`) of messages,
//! access configs and authorization grants reports. Variants follow the
//! registered wasmd errors (`ErrEmpty`, `ErrLimit`, `ErrInvalid`,
//! `ErrDuplicate`) so messages read the same to users of either client.
use address::AddressError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WasmError {
    /// A required field holds no data.
    #[error("empty {0}")]
    Empty(&'static str),

    /// A field exceeds the size accepted by the chain.
    #[error("{field}: cannot be longer than {max} bytes, got {len}")]
    Limit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Field content is malformed.
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// The same value was given more than once where a set is expected.
    #[error("duplicate {field}: {value}")]
    Duplicate { field: &'static str, value: String },

    /// Wrapper around an address that failed to decode.
    #[error("invalid {field} address: {source}")]
    Address {
        field: &'static str,
        #[source]
        source: AddressError,
    },
}
