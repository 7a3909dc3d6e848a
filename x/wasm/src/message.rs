//! Transaction message definitions for the wasm module.
//!
//! Messages correspond to user actions such as uploading code, instantiating,
//! executing and migrating contracts, managing a contract's admin and label,
//! and granting other accounts the right to do so. Every message offers
//! `validate_basic`, the stateless checks a node runs before accepting it,
//! and converts into its protobuf form for signing.
use address::AccAddress;
use chrono::{DateTime, Utc};
use core_types::UnsignedCoins;
use cosmwasm_std::Binary;
use serde::Serialize;

use crate::{
    error::WasmError,
    types::{access_config::AccessConfig, authz::Authorization, proto},
};

/// Maximum length of a contract label in bytes.
pub const MAX_LABEL_SIZE: usize = 128;
/// Maximum size of uploaded wasm byte code.
pub const MAX_WASM_SIZE: usize = 800 * 1024;
/// Maximum length of the salt used for predictable contract addresses.
pub const MAX_SALT_SIZE: usize = 64;

/// Upload new contract code.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MsgStoreCode {
    pub sender: AccAddress,
    pub wasm_byte_code: Binary,
    pub instantiate_permission: Option<AccessConfig>,
}

impl MsgStoreCode {
    pub const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgStoreCode";

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        validate_wasm_code(self.wasm_byte_code.as_slice())?;
        if let Some(permission) = &self.instantiate_permission {
            permission.validate_basic()?;
        }
        Ok(())
    }
}

impl From<MsgStoreCode> for proto::MsgStoreCode {
    fn from(value: MsgStoreCode) -> Self {
        Self {
            sender: value.sender.to_string(),
            wasm_byte_code: value.wasm_byte_code.into(),
            instantiate_permission: value.instantiate_permission.map(Into::into),
        }
    }
}

/// Instantiate a contract.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MsgInstantiateContract {
    pub sender: AccAddress,
    /// Account allowed to migrate the contract. `None` makes it immutable.
    pub admin: Option<AccAddress>,
    pub code_id: u64,
    pub label: String,
    /// Constructor message, passed to the contract untouched.
    pub msg: Binary,
    pub funds: UnsignedCoins,
}

impl MsgInstantiateContract {
    pub const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgInstantiateContract";

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        validate_code_id(self.code_id)?;
        validate_label(&self.label)?;
        validate_msg(&self.msg)
    }
}

impl From<MsgInstantiateContract> for proto::MsgInstantiateContract {
    fn from(value: MsgInstantiateContract) -> Self {
        Self {
            sender: value.sender.to_string(),
            admin: value.admin.map(|a| a.to_string()).unwrap_or_default(),
            code_id: value.code_id,
            label: value.label,
            msg: value.msg.into(),
            funds: value.funds.into(),
        }
    }
}

/// Instantiate a contract at an address derived from creator, code checksum
/// and salt (and optionally the constructor message).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MsgInstantiateContract2 {
    pub sender: AccAddress,
    pub admin: Option<AccAddress>,
    pub code_id: u64,
    pub label: String,
    pub msg: Binary,
    pub funds: UnsignedCoins,
    pub salt: Binary,
    /// Include `msg` in the address derivation.
    pub fix_msg: bool,
}

impl MsgInstantiateContract2 {
    pub const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgInstantiateContract2";

    pub fn from_instantiate(msg: MsgInstantiateContract, salt: Vec<u8>, fix_msg: bool) -> Self {
        let MsgInstantiateContract {
            sender,
            admin,
            code_id,
            label,
            msg,
            funds,
        } = msg;

        Self {
            sender,
            admin,
            code_id,
            label,
            msg,
            funds,
            salt: Binary::from(salt),
            fix_msg,
        }
    }

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        validate_code_id(self.code_id)?;
        validate_label(&self.label)?;
        validate_msg(&self.msg)?;

        match self.salt.len() {
            0 => Err(WasmError::Empty("salt")),
            len if len > MAX_SALT_SIZE => Err(WasmError::Limit {
                field: "salt",
                len,
                max: MAX_SALT_SIZE,
            }),
            _ => Ok(()),
        }
    }
}

impl From<MsgInstantiateContract2> for proto::MsgInstantiateContract2 {
    fn from(value: MsgInstantiateContract2) -> Self {
        Self {
            sender: value.sender.to_string(),
            admin: value.admin.map(|a| a.to_string()).unwrap_or_default(),
            code_id: value.code_id,
            label: value.label,
            msg: value.msg.into(),
            funds: value.funds.into(),
            salt: value.salt.into(),
            fix_msg: value.fix_msg,
        }
    }
}

/// Execute a contract.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MsgExecuteContract {
    pub sender: AccAddress,
    /// Contract address as given by the user, checked by `validate_basic`.
    pub contract: String,
    pub msg: Binary,
    pub funds: UnsignedCoins,
}

impl MsgExecuteContract {
    pub const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgExecuteContract";

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        AccAddress::from_bech32(&self.contract).map_err(|source| WasmError::Address {
            field: "contract",
            source,
        })?;
        validate_msg(&self.msg)
    }
}

impl From<MsgExecuteContract> for proto::MsgExecuteContract {
    fn from(value: MsgExecuteContract) -> Self {
        Self {
            sender: value.sender.to_string(),
            contract: value.contract,
            msg: value.msg.into(),
            funds: value.funds.into(),
        }
    }
}

/// Migrate a contract to new code.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MsgMigrateContract {
    pub sender: AccAddress,
    pub contract: AccAddress,
    pub code_id: u64,
    pub msg: Binary,
}

impl MsgMigrateContract {
    pub const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgMigrateContract";

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        validate_code_id(self.code_id)?;
        validate_msg(&self.msg)
    }
}

impl From<MsgMigrateContract> for proto::MsgMigrateContract {
    fn from(value: MsgMigrateContract) -> Self {
        Self {
            sender: value.sender.to_string(),
            contract: value.contract.to_string(),
            code_id: value.code_id,
            msg: value.msg.into(),
        }
    }
}

/// Hand over contract administration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MsgUpdateAdmin {
    pub sender: AccAddress,
    pub new_admin: AccAddress,
    pub contract: AccAddress,
}

impl MsgUpdateAdmin {
    pub const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgUpdateAdmin";

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        if self.new_admin == self.sender {
            return Err(WasmError::Invalid {
                field: "new admin",
                reason: "new admin is the same as the old".to_owned(),
            });
        }
        Ok(())
    }
}

impl From<MsgUpdateAdmin> for proto::MsgUpdateAdmin {
    fn from(value: MsgUpdateAdmin) -> Self {
        Self {
            sender: value.sender.to_string(),
            new_admin: value.new_admin.to_string(),
            contract: value.contract.to_string(),
        }
    }
}

/// Remove the admin, making the contract immutable.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MsgClearAdmin {
    pub sender: AccAddress,
    pub contract: AccAddress,
}

impl MsgClearAdmin {
    pub const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgClearAdmin";

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        Ok(())
    }
}

impl From<MsgClearAdmin> for proto::MsgClearAdmin {
    fn from(value: MsgClearAdmin) -> Self {
        Self {
            sender: value.sender.to_string(),
            contract: value.contract.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MsgUpdateContractLabel {
    pub sender: AccAddress,
    pub new_label: String,
    pub contract: AccAddress,
}

impl MsgUpdateContractLabel {
    pub const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgUpdateContractLabel";

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        validate_label(&self.new_label)
    }
}

impl From<MsgUpdateContractLabel> for proto::MsgUpdateContractLabel {
    fn from(value: MsgUpdateContractLabel) -> Self {
        Self {
            sender: value.sender.to_string(),
            new_label: value.new_label,
            contract: value.contract.to_string(),
        }
    }
}

/// Replace the instantiate permission of stored code.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MsgUpdateInstantiateConfig {
    pub sender: AccAddress,
    pub code_id: u64,
    pub new_instantiate_permission: Option<AccessConfig>,
}

impl MsgUpdateInstantiateConfig {
    pub const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgUpdateInstantiateConfig";

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        validate_code_id(self.code_id)?;
        self.new_instantiate_permission
            .as_ref()
            .ok_or(WasmError::Empty("instantiate config"))?
            .validate_basic()
    }
}

impl From<MsgUpdateInstantiateConfig> for proto::MsgUpdateInstantiateConfig {
    fn from(value: MsgUpdateInstantiateConfig) -> Self {
        Self {
            sender: value.sender.to_string(),
            code_id: value.code_id,
            new_instantiate_permission: value.new_instantiate_permission.map(Into::into),
        }
    }
}

/// Authz grant as accepted by `cosmos.authz.v1beta1.Msg/Grant`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grant {
    pub authorization: Authorization,
    /// `None` means the grant never expires.
    pub expiration: Option<DateTime<Utc>>,
}

/// Allow `grantee` to act on behalf of `granter`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MsgGrant {
    pub granter: AccAddress,
    pub grantee: AccAddress,
    pub grant: Grant,
}

impl MsgGrant {
    pub const TYPE_URL: &'static str = "/cosmos.authz.v1beta1.MsgGrant";

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        if self.granter == self.grantee {
            return Err(WasmError::Invalid {
                field: "grantee",
                reason: "granter and grantee cannot be same".to_owned(),
            });
        }
        self.grant.authorization.validate_basic()
    }
}

impl From<MsgGrant> for proto::MsgGrant {
    fn from(value: MsgGrant) -> Self {
        let Grant {
            authorization,
            expiration,
        } = value.grant;

        Self {
            granter: value.granter.to_string(),
            grantee: value.grantee.to_string(),
            grant: Some(proto::Grant {
                authorization: Some(authorization.to_any()),
                expiration: expiration.map(|time| proto::Timestamp {
                    seconds: time.timestamp(),
                    nanos: time.timestamp_subsec_nanos() as i32,
                }),
            }),
        }
    }
}

/// Every message this module can hand to a signer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "@type")]
pub enum Message {
    #[serde(rename = "/cosmwasm.wasm.v1.MsgStoreCode")]
    StoreCode(MsgStoreCode),
    #[serde(rename = "/cosmwasm.wasm.v1.MsgInstantiateContract")]
    Instantiate(MsgInstantiateContract),
    #[serde(rename = "/cosmwasm.wasm.v1.MsgInstantiateContract2")]
    Instantiate2(MsgInstantiateContract2),
    #[serde(rename = "/cosmwasm.wasm.v1.MsgExecuteContract")]
    Execute(MsgExecuteContract),
    #[serde(rename = "/cosmwasm.wasm.v1.MsgMigrateContract")]
    Migrate(MsgMigrateContract),
    #[serde(rename = "/cosmwasm.wasm.v1.MsgUpdateAdmin")]
    UpdateAdmin(MsgUpdateAdmin),
    #[serde(rename = "/cosmwasm.wasm.v1.MsgClearAdmin")]
    ClearAdmin(MsgClearAdmin),
    #[serde(rename = "/cosmwasm.wasm.v1.MsgUpdateContractLabel")]
    UpdateContractLabel(MsgUpdateContractLabel),
    #[serde(rename = "/cosmwasm.wasm.v1.MsgUpdateInstantiateConfig")]
    UpdateInstantiateConfig(MsgUpdateInstantiateConfig),
    #[serde(rename = "/cosmos.authz.v1beta1.MsgGrant")]
    Grant(MsgGrant),
}

impl Message {
    pub fn type_url(&self) -> &'static str {
        match self {
            Message::StoreCode(_) => MsgStoreCode::TYPE_URL,
            Message::Instantiate(_) => MsgInstantiateContract::TYPE_URL,
            Message::Instantiate2(_) => MsgInstantiateContract2::TYPE_URL,
            Message::Execute(_) => MsgExecuteContract::TYPE_URL,
            Message::Migrate(_) => MsgMigrateContract::TYPE_URL,
            Message::UpdateAdmin(_) => MsgUpdateAdmin::TYPE_URL,
            Message::ClearAdmin(_) => MsgClearAdmin::TYPE_URL,
            Message::UpdateContractLabel(_) => MsgUpdateContractLabel::TYPE_URL,
            Message::UpdateInstantiateConfig(_) => MsgUpdateInstantiateConfig::TYPE_URL,
            Message::Grant(_) => MsgGrant::TYPE_URL,
        }
    }

    pub fn validate_basic(&self) -> Result<(), WasmError> {
        match self {
            Message::StoreCode(msg) => msg.validate_basic(),
            Message::Instantiate(msg) => msg.validate_basic(),
            Message::Instantiate2(msg) => msg.validate_basic(),
            Message::Execute(msg) => msg.validate_basic(),
            Message::Migrate(msg) => msg.validate_basic(),
            Message::UpdateAdmin(msg) => msg.validate_basic(),
            Message::ClearAdmin(msg) => msg.validate_basic(),
            Message::UpdateContractLabel(msg) => msg.validate_basic(),
            Message::UpdateInstantiateConfig(msg) => msg.validate_basic(),
            Message::Grant(msg) => msg.validate_basic(),
        }
    }

    /// Protobuf encoding wrapped in `Any`, the form transactions carry.
    pub fn to_any(&self) -> proto::Any {
        let type_url = self.type_url();
        match self.clone() {
            Message::StoreCode(msg) => proto::to_any(type_url, &proto::MsgStoreCode::from(msg)),
            Message::Instantiate(msg) => {
                proto::to_any(type_url, &proto::MsgInstantiateContract::from(msg))
            }
            Message::Instantiate2(msg) => {
                proto::to_any(type_url, &proto::MsgInstantiateContract2::from(msg))
            }
            Message::Execute(msg) => proto::to_any(type_url, &proto::MsgExecuteContract::from(msg)),
            Message::Migrate(msg) => proto::to_any(type_url, &proto::MsgMigrateContract::from(msg)),
            Message::UpdateAdmin(msg) => proto::to_any(type_url, &proto::MsgUpdateAdmin::from(msg)),
            Message::ClearAdmin(msg) => proto::to_any(type_url, &proto::MsgClearAdmin::from(msg)),
            Message::UpdateContractLabel(msg) => {
                proto::to_any(type_url, &proto::MsgUpdateContractLabel::from(msg))
            }
            Message::UpdateInstantiateConfig(msg) => {
                proto::to_any(type_url, &proto::MsgUpdateInstantiateConfig::from(msg))
            }
            Message::Grant(msg) => proto::to_any(type_url, &proto::MsgGrant::from(msg)),
        }
    }
}

fn validate_code_id(code_id: u64) -> Result<(), WasmError> {
    if code_id == 0 {
        return Err(WasmError::Empty("code id"));
    }
    Ok(())
}

fn validate_msg(msg: &Binary) -> Result<(), WasmError> {
    if msg.is_empty() {
        return Err(WasmError::Empty("msg"));
    }
    Ok(())
}

fn validate_wasm_code(code: &[u8]) -> Result<(), WasmError> {
    match code.len() {
        0 => Err(WasmError::Empty("wasm byte code")),
        len if len > MAX_WASM_SIZE => Err(WasmError::Limit {
            field: "wasm byte code",
            len,
            max: MAX_WASM_SIZE,
        }),
        _ => Ok(()),
    }
}

/// Labels are non empty, bounded and carry no surrounding whitespace.
pub fn validate_label(label: &str) -> Result<(), WasmError> {
    if label.is_empty() {
        return Err(WasmError::Empty("label"));
    }
    if label.len() > MAX_LABEL_SIZE {
        return Err(WasmError::Limit {
            field: "label",
            len: label.len(),
            max: MAX_LABEL_SIZE,
        });
    }
    if label.trim() != label {
        return Err(WasmError::Invalid {
            field: "label",
            reason: "label must not start/end with whitespaces".to_owned(),
        });
    }
    Ok(())
}
