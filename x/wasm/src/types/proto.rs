//! Protobuf wire types.
//!
//! Transaction messages come from `cosmos-sdk-proto`. The authz family and
//! the label update message are declared here with `prost` directly so their
//! `Any` payloads use `prost_types` throughout.

pub use cosmos_sdk_proto::cosmos::base::v1beta1::Coin;
pub use cosmos_sdk_proto::cosmwasm::wasm::v1::{
    AccessConfig, MsgClearAdmin, MsgExecuteContract, MsgInstantiateContract,
    MsgInstantiateContract2, MsgMigrateContract, MsgStoreCode, MsgUpdateAdmin,
    MsgUpdateInstantiateConfig,
};
pub use prost_types::{Any, Timestamp};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgUpdateContractLabel {
    #[prost(string, tag = "1")]
    pub sender: String,
    #[prost(string, tag = "2")]
    pub new_label: String,
    #[prost(string, tag = "3")]
    pub contract: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContractGrant {
    #[prost(string, tag = "1")]
    pub contract: String,
    #[prost(message, optional, tag = "2")]
    pub limit: Option<Any>,
    #[prost(message, optional, tag = "3")]
    pub filter: Option<Any>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContractExecutionAuthorization {
    #[prost(message, repeated, tag = "1")]
    pub grants: Vec<ContractGrant>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContractMigrationAuthorization {
    #[prost(message, repeated, tag = "1")]
    pub grants: Vec<ContractGrant>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CodeGrant {
    #[prost(bytes = "vec", tag = "1")]
    pub code_hash: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub instantiate_permission: Option<AccessConfig>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StoreCodeAuthorization {
    #[prost(message, repeated, tag = "1")]
    pub grants: Vec<CodeGrant>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MaxCallsLimit {
    #[prost(uint64, tag = "1")]
    pub remaining: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MaxFundsLimit {
    #[prost(message, repeated, tag = "1")]
    pub amounts: Vec<Coin>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CombinedLimit {
    #[prost(uint64, tag = "1")]
    pub calls_remaining: u64,
    #[prost(message, repeated, tag = "2")]
    pub amounts: Vec<Coin>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AllowAllMessagesFilter {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AcceptedMessageKeysFilter {
    #[prost(string, repeated, tag = "1")]
    pub keys: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AcceptedMessagesFilter {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub messages: Vec<Vec<u8>>,
}

/// `cosmos.authz.v1beta1.Grant`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Grant {
    #[prost(message, optional, tag = "1")]
    pub authorization: Option<Any>,
    #[prost(message, optional, tag = "2")]
    pub expiration: Option<Timestamp>,
}

/// `cosmos.authz.v1beta1.MsgGrant`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgGrant {
    #[prost(string, tag = "1")]
    pub granter: String,
    #[prost(string, tag = "2")]
    pub grantee: String,
    #[prost(message, optional, tag = "3")]
    pub grant: Option<Grant>,
}

/// Pack an encoded message together with its type URL.
pub fn to_any(type_url: &str, msg: &impl ::prost::Message) -> Any {
    Any {
        type_url: type_url.to_owned(),
        value: msg.encode_to_vec(),
    }
}
