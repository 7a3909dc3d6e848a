//! Bech32 encoded account and contract addresses.
//!
//! Addresses are kept together with their human readable part so the same
//! type serves account keys (`cosmos1...`) and contract instances, which use
//! a longer 32 byte payload.

use std::{fmt, str::FromStr};

use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Serialize};

/// Longest address payload accepted by the SDK address codec.
pub const MAX_ADDR_LEN: usize = 255;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty address string is not allowed")]
    Empty,
    #[error("decoding bech32 failed: {0}")]
    Decode(#[from] bech32::Error),
    #[error("invalid variant, expected Bech32 found Bech32m")]
    InvalidVariant,
    #[error("addresses cannot be empty")]
    EmptyPayload,
    #[error("address max length is {MAX_ADDR_LEN}, got {0}")]
    InvalidLength(usize),
}

/// Account or contract address.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccAddress {
    bech32: String,
    hrp_len: usize,
    bytes: Vec<u8>,
}

impl AccAddress {
    /// Parse and checksum-verify a bech32 address. Any human readable part is
    /// accepted, the payload must be between 1 and [`MAX_ADDR_LEN`] bytes.
    pub fn from_bech32(address: &str) -> Result<Self, AddressError> {
        if address.trim().is_empty() {
            return Err(AddressError::Empty);
        }

        let (hrp, data, variant) = bech32::decode(address)?;
        if variant != Variant::Bech32 {
            return Err(AddressError::InvalidVariant);
        }

        let bytes = Vec::<u8>::from_base32(&data)?;
        Self::new(&hrp, bytes)
    }

    /// Build an address from its raw payload.
    pub fn new(hrp: &str, bytes: Vec<u8>) -> Result<Self, AddressError> {
        match bytes.len() {
            0 => return Err(AddressError::EmptyPayload),
            len if len > MAX_ADDR_LEN => return Err(AddressError::InvalidLength(len)),
            _ => (),
        }

        let bech32 = bech32::encode(hrp, bytes.to_base32(), Variant::Bech32)?;

        Ok(Self {
            hrp_len: hrp.len(),
            bech32,
            bytes,
        })
    }

    pub fn hrp(&self) -> &str {
        &self.bech32[..self.hrp_len]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for AccAddress {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bech32)
    }
}

impl FromStr for AccAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}

impl TryFrom<String> for AccAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_bech32(&value)
    }
}

impl From<AccAddress> for String {
    fn from(value: AccAddress) -> Self {
        value.bech32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACC: &str = "cosmos1syavy2npfyt9tcncdtsdzf7kny9lh777pahuux";

    #[test]
    fn from_bech32_round_trip() {
        let addr = AccAddress::from_bech32(ACC).unwrap();

        assert_eq!(addr.hrp(), "cosmos");
        assert_eq!(addr.len(), 20);
        assert_eq!(addr.to_string(), ACC);
    }

    #[test]
    fn from_bytes_matches_known_encoding() {
        let addr = AccAddress::new("cosmos", (1..=20).collect()).unwrap();

        assert_eq!(
            addr.to_string(),
            "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu"
        );
    }

    #[test]
    fn contract_sized_payload_accepted() {
        let addr = AccAddress::from_bech32(
            "cosmos1qurswpc8qurswpc8qurswpc8qurswpc8qurswpc8qurswpc8qurs79d55s",
        )
        .unwrap();

        assert_eq!(addr.as_bytes(), &[7u8; 32]);
    }

    #[test]
    fn uppercase_is_normalized() {
        let addr = AccAddress::from_bech32(&ACC.to_uppercase()).unwrap();

        assert_eq!(addr.to_string(), ACC);
    }

    #[test]
    fn empty_string_rejected() {
        assert_eq!(AccAddress::from_bech32(""), Err(AddressError::Empty));
    }

    #[test]
    fn bad_checksum_rejected() {
        let err = AccAddress::from_bech32("cosmos1syavy2npfyt9tcncdtsdzf7kny9lh777pahuuy")
            .unwrap_err();

        assert!(matches!(err, AddressError::Decode(_)));
    }

    #[test]
    fn oversized_payload_rejected() {
        assert_eq!(
            AccAddress::new("cosmos", vec![1; 256]),
            Err(AddressError::InvalidLength(256))
        );
        assert_eq!(
            AccAddress::new("cosmos", vec![]),
            Err(AddressError::EmptyPayload)
        );
    }

    #[test]
    fn serde_as_string() {
        let addr = AccAddress::from_bech32(ACC).unwrap();
        let json = serde_json::to_string(&addr).unwrap();

        assert_eq!(json, format!("\"{ACC}\""));
        assert_eq!(serde_json::from_str::<AccAddress>(&json).unwrap(), addr);
        assert!(serde_json::from_str::<AccAddress>("\"wasm1xyz\"").is_err());
    }
}
