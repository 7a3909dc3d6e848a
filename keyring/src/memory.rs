use std::collections::BTreeMap;

use address::AccAddress;

use crate::{KeyLookup, KeyringError};

/// Keyring held entirely in memory. Handy for tests and for callers that
/// already loaded their key records elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyring {
    keys: BTreeMap<String, AccAddress>,
}

impl MemoryKeyring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, address: AccAddress) -> Option<AccAddress> {
        self.keys.insert(name.into(), address)
    }

    pub fn with_key(mut self, name: impl Into<String>, address: AccAddress) -> Self {
        self.insert(name, address);
        self
    }
}

impl KeyLookup for MemoryKeyring {
    fn resolve(&self, name: &str) -> Result<AccAddress, KeyringError> {
        self.keys
            .get(name)
            .cloned()
            .ok_or_else(|| KeyringError::NotFound {
                name: name.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_known_and_unknown() {
        let addr = AccAddress::from_bech32("cosmos1syavy2npfyt9tcncdtsdzf7kny9lh777pahuux").unwrap();
        let keyring = MemoryKeyring::new().with_key("alice", addr.clone());

        assert_eq!(keyring.resolve("alice").unwrap(), addr);
        assert!(matches!(
            keyring.resolve("bob"),
            Err(KeyringError::NotFound { name }) if name == "bob"
        ));
    }
}
