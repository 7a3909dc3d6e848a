//! Authorization grants for delegated contract calls, migrations and code
//! uploads.
//!
//! A [`ContractGrant`] pairs a contract with exactly one [`ContractAuthzLimit`]
//! and exactly one [`ContractAuthzFilter`]. Grants are wrapped in an
//! [`Authorization`] which is what the authz module stores for a
//! granter/grantee pair. Corresponds to `x/wasm/types/authz.go` in wasmd.

use std::collections::BTreeSet;

use address::AccAddress;
use core_types::UnsignedCoins;
use cosmwasm_std::Binary;
use serde::{de::IgnoredAny, Serialize};

use crate::{
    error::WasmError,
    types::{access_config::AccessConfig, proto},
};

/// Code hash value granting uploads of any code.
pub const CODE_HASH_WILDCARD: &str = "*";

/// Bound on how often or with how many funds a grantee may act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type")]
pub enum ContractAuthzLimit {
    #[serde(rename = "/cosmwasm.wasm.v1.MaxCallsLimit")]
    MaxCalls { remaining: u64 },
    #[serde(rename = "/cosmwasm.wasm.v1.MaxFundsLimit")]
    MaxFunds { amounts: UnsignedCoins },
    #[serde(rename = "/cosmwasm.wasm.v1.CombinedLimit")]
    Combined {
        calls_remaining: u64,
        amounts: UnsignedCoins,
    },
}

impl ContractAuthzLimit {
    pub fn max_calls(remaining: u64) -> Self {
        Self::MaxCalls { remaining }
    }

    pub fn max_funds(amounts: UnsignedCoins) -> Self {
        Self::MaxFunds { amounts }
    }

    pub fn combined(calls_remaining: u64, amounts: UnsignedCoins) -> Self {
        Self::Combined {
            calls_remaining,
            amounts,
        }
    }

    pub fn type_url(&self) -> &'static str {
        match self {
            Self::MaxCalls { .. } => "/cosmwasm.wasm.v1.MaxCallsLimit",
            Self::MaxFunds { .. } => "/cosmwasm.wasm.v1.MaxFundsLimit",
            Self::Combined { .. } => "/cosmwasm.wasm.v1.CombinedLimit",
        }
    }

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        match self {
            Self::MaxCalls { remaining } => validate_calls(*remaining),
            Self::MaxFunds { amounts } => validate_amounts(amounts),
            Self::Combined {
                calls_remaining,
                amounts,
            } => {
                validate_calls(*calls_remaining)?;
                validate_amounts(amounts)
            }
        }
    }

    pub fn to_any(&self) -> proto::Any {
        match self.clone() {
            Self::MaxCalls { remaining } => {
                proto::to_any(self.type_url(), &proto::MaxCallsLimit { remaining })
            }
            Self::MaxFunds { amounts } => proto::to_any(
                self.type_url(),
                &proto::MaxFundsLimit {
                    amounts: amounts.into(),
                },
            ),
            Self::Combined {
                calls_remaining,
                amounts,
            } => proto::to_any(
                self.type_url(),
                &proto::CombinedLimit {
                    calls_remaining,
                    amounts: amounts.into(),
                },
            ),
        }
    }
}

fn validate_calls(remaining: u64) -> Result<(), WasmError> {
    if remaining == 0 {
        return Err(WasmError::Empty("remaining calls"));
    }
    Ok(())
}

fn validate_amounts(amounts: &UnsignedCoins) -> Result<(), WasmError> {
    if amounts.is_empty() {
        return Err(WasmError::Empty("amounts"));
    }
    Ok(())
}

/// Which contract messages a grantee may send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type")]
pub enum ContractAuthzFilter {
    #[serde(rename = "/cosmwasm.wasm.v1.AllowAllMessagesFilter")]
    AllowAll,
    /// Top level JSON keys of accepted messages.
    #[serde(rename = "/cosmwasm.wasm.v1.AcceptedMessageKeysFilter")]
    AcceptedKeys { keys: Vec<String> },
    /// Accepted messages, compared byte for byte.
    #[serde(rename = "/cosmwasm.wasm.v1.AcceptedMessagesFilter")]
    AcceptedMessages { messages: Vec<Binary> },
}

impl ContractAuthzFilter {
    pub fn accepted_keys(keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::AcceptedKeys {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn accepted_messages(messages: impl IntoIterator<Item = impl Into<Binary>>) -> Self {
        Self::AcceptedMessages {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn type_url(&self) -> &'static str {
        match self {
            Self::AllowAll => "/cosmwasm.wasm.v1.AllowAllMessagesFilter",
            Self::AcceptedKeys { .. } => "/cosmwasm.wasm.v1.AcceptedMessageKeysFilter",
            Self::AcceptedMessages { .. } => "/cosmwasm.wasm.v1.AcceptedMessagesFilter",
        }
    }

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        match self {
            Self::AllowAll => Ok(()),
            Self::AcceptedKeys { keys } => {
                if keys.is_empty() {
                    return Err(WasmError::Empty("keys"));
                }
                let mut seen = BTreeSet::new();
                for key in keys {
                    if key.trim().is_empty() {
                        return Err(WasmError::Empty("key"));
                    }
                    if !seen.insert(key.as_str()) {
                        return Err(WasmError::Duplicate {
                            field: "key",
                            value: key.clone(),
                        });
                    }
                }
                Ok(())
            }
            Self::AcceptedMessages { messages } => {
                if messages.is_empty() {
                    return Err(WasmError::Empty("messages"));
                }
                let mut seen = BTreeSet::new();
                for msg in messages {
                    if msg.is_empty() {
                        return Err(WasmError::Empty("message"));
                    }
                    if serde_json::from_slice::<IgnoredAny>(msg).is_err() {
                        return Err(WasmError::Invalid {
                            field: "message",
                            reason: "must be valid json".to_owned(),
                        });
                    }
                    if !seen.insert(msg.as_slice()) {
                        return Err(WasmError::Duplicate {
                            field: "message",
                            value: String::from_utf8_lossy(msg).into_owned(),
                        });
                    }
                }
                Ok(())
            }
        }
    }

    pub fn to_any(&self) -> proto::Any {
        match self {
            Self::AllowAll => proto::to_any(self.type_url(), &proto::AllowAllMessagesFilter {}),
            Self::AcceptedKeys { keys } => proto::to_any(
                self.type_url(),
                &proto::AcceptedMessageKeysFilter { keys: keys.clone() },
            ),
            Self::AcceptedMessages { messages } => proto::to_any(
                self.type_url(),
                &proto::AcceptedMessagesFilter {
                    messages: messages.iter().map(|m| m.to_vec()).collect(),
                },
            ),
        }
    }
}

/// Permission to act on one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractGrant {
    contract: AccAddress,
    limit: ContractAuthzLimit,
    filter: ContractAuthzFilter,
}

impl ContractGrant {
    /// Fails when the limit or the filter is not usable on its own, e.g. a
    /// zero call budget or an empty key list.
    pub fn new(
        contract: AccAddress,
        limit: ContractAuthzLimit,
        filter: ContractAuthzFilter,
    ) -> Result<Self, WasmError> {
        let grant = Self {
            contract,
            limit,
            filter,
        };
        grant.validate_basic()?;

        Ok(grant)
    }

    pub fn contract(&self) -> &AccAddress {
        &self.contract
    }

    pub fn limit(&self) -> &ContractAuthzLimit {
        &self.limit
    }

    pub fn filter(&self) -> &ContractAuthzFilter {
        &self.filter
    }

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        self.limit.validate_basic()?;
        self.filter.validate_basic()
    }
}

impl From<ContractGrant> for proto::ContractGrant {
    fn from(value: ContractGrant) -> Self {
        Self {
            contract: value.contract.to_string(),
            limit: Some(value.limit.to_any()),
            filter: Some(value.filter.to_any()),
        }
    }
}

/// Permission to upload code with a given hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeGrant {
    /// Hash identifying the code, or [`CODE_HASH_WILDCARD`].
    pub code_hash: Vec<u8>,
    /// Instantiate permission the uploaded code must carry. `None` leaves it
    /// unrestricted.
    pub instantiate_permission: Option<AccessConfig>,
}

impl CodeGrant {
    pub fn validate_basic(&self) -> Result<(), WasmError> {
        if self.code_hash.is_empty() {
            return Err(WasmError::Empty("code hash"));
        }
        match &self.instantiate_permission {
            Some(permission) => permission.validate_basic(),
            None => Ok(()),
        }
    }

    fn is_wildcard(&self) -> bool {
        self.code_hash == CODE_HASH_WILDCARD.as_bytes()
    }
}

impl From<CodeGrant> for proto::CodeGrant {
    fn from(value: CodeGrant) -> Self {
        Self {
            code_hash: value.code_hash,
            instantiate_permission: value.instantiate_permission.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type")]
pub enum Authorization {
    #[serde(rename = "/cosmwasm.wasm.v1.ContractExecutionAuthorization")]
    ContractExecution { grants: Vec<ContractGrant> },
    #[serde(rename = "/cosmwasm.wasm.v1.ContractMigrationAuthorization")]
    ContractMigration { grants: Vec<ContractGrant> },
    #[serde(rename = "/cosmwasm.wasm.v1.StoreCodeAuthorization")]
    StoreCode { grants: Vec<CodeGrant> },
}

impl Authorization {
    pub fn type_url(&self) -> &'static str {
        match self {
            Self::ContractExecution { .. } => "/cosmwasm.wasm.v1.ContractExecutionAuthorization",
            Self::ContractMigration { .. } => "/cosmwasm.wasm.v1.ContractMigrationAuthorization",
            Self::StoreCode { .. } => "/cosmwasm.wasm.v1.StoreCodeAuthorization",
        }
    }

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        match self {
            Self::ContractExecution { grants } | Self::ContractMigration { grants } => {
                if grants.is_empty() {
                    return Err(WasmError::Empty("grants"));
                }
                grants.iter().try_for_each(ContractGrant::validate_basic)
            }
            Self::StoreCode { grants } => validate_code_grants(grants),
        }
    }

    pub fn to_any(&self) -> proto::Any {
        match self.clone() {
            Self::ContractExecution { grants } => proto::to_any(
                self.type_url(),
                &proto::ContractExecutionAuthorization {
                    grants: grants.into_iter().map(Into::into).collect(),
                },
            ),
            Self::ContractMigration { grants } => proto::to_any(
                self.type_url(),
                &proto::ContractMigrationAuthorization {
                    grants: grants.into_iter().map(Into::into).collect(),
                },
            ),
            Self::StoreCode { grants } => proto::to_any(
                self.type_url(),
                &proto::StoreCodeAuthorization {
                    grants: grants.into_iter().map(Into::into).collect(),
                },
            ),
        }
    }
}

fn validate_code_grants(grants: &[CodeGrant]) -> Result<(), WasmError> {
    match grants {
        [] => Err(WasmError::Empty("grants")),
        [grant] => grant.validate_basic(),
        grants => {
            let mut seen = BTreeSet::new();
            for grant in grants {
                if grant.is_wildcard() {
                    return Err(WasmError::Invalid {
                        field: "grants",
                        reason: "cannot have multiple grants when wildcard grant is one of them"
                            .to_owned(),
                    });
                }
                if !seen.insert(grant.code_hash.as_slice()) {
                    return Err(WasmError::Duplicate {
                        field: "code hash",
                        value: String::from_utf8_lossy(&grant.code_hash).into_owned(),
                    });
                }
                grant.validate_basic()?;
            }
            Ok(())
        }
    }
}
