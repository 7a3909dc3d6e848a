//! Command line interface for the wasm module.
//!
//! Offers subcommands to upload, instantiate, execute and migrate contracts,
//! to manage contract admins and labels and to grant other accounts the
//! right to do so.
pub mod error;
pub mod salt;
pub mod tx;

pub use error::{ErrorKind, SaltError, TxParseError};
pub use salt::SaltEncodingFlags;
