//! Instantiate permissions attached to uploaded code.

use std::collections::BTreeSet;

use address::AccAddress;
use serde::{Deserialize, Serialize};
use vec1::Vec1;

use crate::error::WasmError;

/// Wire values of `cosmwasm.wasm.v1.AccessType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum AccessType {
    Unspecified = 0,
    Nobody = 1,
    Everybody = 3,
    AnyOfAddresses = 4,
}

/// Who may instantiate contracts from a code id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "permission", content = "addresses")]
pub enum AccessConfig {
    Nobody,
    Everybody,
    AnyOfAddresses(Vec1<AccAddress>),
}

impl AccessConfig {
    /// Restrict instantiation to the given addresses. The list must be non
    /// empty and free of duplicates; order is kept as given.
    pub fn any_of_addresses(addresses: Vec<AccAddress>) -> Result<Self, WasmError> {
        let addresses =
            Vec1::try_from_vec(addresses).map_err(|_| WasmError::Empty("addresses"))?;
        let config = Self::AnyOfAddresses(addresses);
        config.validate_basic()?;

        Ok(config)
    }

    pub fn access_type(&self) -> AccessType {
        match self {
            AccessConfig::Nobody => AccessType::Nobody,
            AccessConfig::Everybody => AccessType::Everybody,
            AccessConfig::AnyOfAddresses(_) => AccessType::AnyOfAddresses,
        }
    }

    pub fn addresses(&self) -> &[AccAddress] {
        match self {
            AccessConfig::AnyOfAddresses(addresses) => addresses.as_slice(),
            AccessConfig::Nobody | AccessConfig::Everybody => &[],
        }
    }

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        let mut seen = BTreeSet::new();
        for addr in self.addresses() {
            if !seen.insert(addr) {
                return Err(WasmError::Duplicate {
                    field: "address",
                    value: addr.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl From<AccessConfig> for cosmos_sdk_proto::cosmwasm::wasm::v1::AccessConfig {
    fn from(value: AccessConfig) -> Self {
        Self {
            permission: value.access_type() as i32,
            addresses: value.addresses().iter().map(ToString::to_string).collect(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> AccAddress {
        AccAddress::from_bech32(s).unwrap()
    }

    #[test]
    fn any_of_addresses_rejects_empty_and_duplicates() {
        let a = addr("cosmos1syavy2npfyt9tcncdtsdzf7kny9lh777pahuux");
        let b = addr("cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu");

        assert_eq!(
            AccessConfig::any_of_addresses(vec![]),
            Err(WasmError::Empty("addresses"))
        );
        assert!(matches!(
            AccessConfig::any_of_addresses(vec![a.clone(), b.clone(), a.clone()]),
            Err(WasmError::Duplicate { field: "address", .. })
        ));

        let config = AccessConfig::any_of_addresses(vec![b.clone(), a.clone()]).unwrap();
        assert_eq!(config.addresses(), &[b, a]);
        assert_eq!(config.access_type(), AccessType::AnyOfAddresses);
    }

    #[test]
    fn proto_permission_values() {
        let nobody: cosmos_sdk_proto::cosmwasm::wasm::v1::AccessConfig =
            AccessConfig::Nobody.into();
        let everybody: cosmos_sdk_proto::cosmwasm::wasm::v1::AccessConfig =
            AccessConfig::Everybody.into();

        assert_eq!(nobody.permission, 1);
        assert_eq!(everybody.permission, 3);
        assert!(everybody.addresses.is_empty());
    }

    #[test]
    fn json_shape() {
        let config = AccessConfig::any_of_addresses(vec![addr(
            "cosmos1syavy2npfyt9tcncdtsdzf7kny9lh777pahuux",
        )])
        .unwrap();

        assert_eq!(
            serde_json::to_string(&config).unwrap(),
            r#"{"permission":"AnyOfAddresses","addresses":["cosmos1syavy2npfyt9tcncdtsdzf7kny9lh777pahuux"]}"#
        );
        assert_eq!(
            serde_json::to_string(&AccessConfig::Nobody).unwrap(),
            r#"{"permission":"Nobody"}"#
        );
    }
}
