//! Domain types of the wasm module.
//!
//! These mirror the structures defined in `wasmd` under
//! [`x/wasm/types`](https://github.com/CosmWasm/wasmd/tree/main/x/wasm/types).
//!
//! ````
//! use wasm::types::AccessConfig;
//! ````

pub mod access_config;
pub mod authz;
pub mod proto;

pub use self::access_config::{AccessConfig, AccessType};
pub use self::authz::{
    Authorization, CodeGrant, ContractAuthzFilter, ContractAuthzLimit, ContractGrant,
    CODE_HASH_WILDCARD,
};
