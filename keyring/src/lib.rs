//! Key name to address resolution.
//!
//! The transaction builders accept either a bech32 address or the name of a
//! local key wherever an identity is expected. Private key material is never
//! touched here: a keyring only needs to answer which address a name stands
//! for.

pub mod error;
pub mod file;
pub mod memory;

pub use error::KeyringError;
pub use file::FileKeyring;
pub use memory::MemoryKeyring;

use address::AccAddress;

/// Lookup of addresses by key name.
pub trait KeyLookup {
    /// Address of the key stored under `name`. Fails with
    /// [`KeyringError::NotFound`] for unknown names.
    fn resolve(&self, name: &str) -> Result<AccAddress, KeyringError>;
}

impl<T: KeyLookup + ?Sized> KeyLookup for &T {
    fn resolve(&self, name: &str) -> Result<AccAddress, KeyringError> {
        (**self).resolve(name)
    }
}
