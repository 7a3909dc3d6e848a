//! CLI transaction subcommands for the wasm module.
//!
//! Every subcommand is turned into a validated [`Message`] by one of the
//! `parse_*` builders below. Builders are pure apart from key lookups, so
//! the flag combinations they accept can be exercised without a chain.
//! Signing and broadcasting are left to a [`TxSubmitter`].

use std::{io::Write, path::PathBuf};

use address::AccAddress;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use core_types::UnsignedCoins;
use cosmwasm_std::Binary;
use flate2::{write::GzEncoder, Compression};
use keyring::{KeyLookup, KeyringError};

use super::{error::TxParseError, salt::SaltEncodingFlags};
use crate::{
    message::{
        Grant, Message, MsgClearAdmin, MsgExecuteContract, MsgGrant, MsgInstantiateContract,
        MsgInstantiateContract2, MsgMigrateContract, MsgStoreCode, MsgUpdateAdmin,
        MsgUpdateContractLabel, MsgUpdateInstantiateConfig,
    },
    types::{
        access_config::AccessConfig,
        authz::{Authorization, CodeGrant, ContractAuthzFilter, ContractAuthzLimit, ContractGrant},
    },
};

const WASM_MAGIC: &[u8] = b"\0asm";
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];

/// Signs and delivers a message built by [`WasmTxHandler`].
pub trait TxSubmitter {
    type Output;
    type Error;

    fn submit(&self, msg: Message) -> Result<Self::Output, Self::Error>;
}

/// CLI entrypoint for wasm transactions.
#[derive(Args, Debug, Clone)]
pub struct WasmTxCli {
    #[command(subcommand)]
    pub command: WasmCommands,
}

/// Individual wasm transaction commands.
#[derive(Subcommand, Debug, Clone)]
pub enum WasmCommands {
    /// Upload a wasm binary
    #[command(visible_aliases = ["upload", "st", "s"])]
    Store(StoreCodeArgs),
    /// Instantiate a wasm contract
    #[command(visible_aliases = ["start", "init", "inst", "i"])]
    Instantiate(InstantiateArgs),
    /// Instantiate a wasm contract at a predictable address
    Instantiate2(Instantiate2Args),
    /// Execute a command on a wasm contract
    #[command(visible_aliases = ["run", "call", "exec", "ex", "e"])]
    Execute(ExecuteArgs),
    /// Migrate a wasm contract to a new code version
    #[command(visible_aliases = ["update", "mig", "m"])]
    Migrate(MigrateArgs),
    /// Set new admin for a contract
    #[command(visible_alias = "new-admin")]
    SetContractAdmin(SetContractAdminArgs),
    /// Clears admin for a contract to prevent further migrations
    #[command(visible_alias = "clear-admin")]
    ClearContractAdmin(ClearContractAdminArgs),
    /// Set new label for a contract
    SetContractLabel(SetContractLabelArgs),
    /// Update instantiate config for a codeID
    UpdateInstantiateConfig(UpdateInstantiateConfigArgs),
    /// Grant authorization to interact with a contract on behalf of you
    Grant(GrantCli),
}

#[derive(Args, Debug, Clone)]
pub struct StoreCodeArgs {
    /// Path to a wasm binary or a gzip archive of one
    pub wasm_file: PathBuf,
    #[command(flatten)]
    pub permission: AccessConfigFlags,
}

#[derive(Args, Debug, Clone)]
pub struct InstantiateArgs {
    pub code_id: String,
    /// JSON encoded init message
    pub json_msg: String,
    #[command(flatten)]
    pub flags: InstantiateFlags,
}

#[derive(Args, Debug, Clone)]
pub struct Instantiate2Args {
    pub code_id: String,
    pub json_msg: String,
    pub salt: String,
    #[command(flatten)]
    pub flags: InstantiateFlags,
    #[command(flatten)]
    pub salt_encoding: SaltEncodingFlags,
    /// Include the init message in the predictable address derivation
    #[arg(long)]
    pub fix_msg: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExecuteArgs {
    pub contract: String,
    pub json_msg: String,
    /// Coins to send to the contract along with command
    #[arg(long, default_value = "")]
    pub amount: String,
}

#[derive(Args, Debug, Clone)]
pub struct MigrateArgs {
    pub contract: String,
    pub new_code_id: String,
    pub json_msg: String,
}

#[derive(Args, Debug, Clone)]
pub struct SetContractAdminArgs {
    pub contract: String,
    pub new_admin: String,
}

#[derive(Args, Debug, Clone)]
pub struct ClearContractAdminArgs {
    pub contract: String,
}

#[derive(Args, Debug, Clone)]
pub struct SetContractLabelArgs {
    pub contract: String,
    pub new_label: String,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateInstantiateConfigArgs {
    pub code_id: String,
    #[command(flatten)]
    pub permission: AccessConfigFlags,
}

#[derive(Args, Debug, Clone)]
pub struct GrantCli {
    #[command(subcommand)]
    pub command: GrantCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum GrantCommands {
    /// Grant authorization to interact with a contract on behalf of you
    Contract(GrantContractArgs),
    /// Grant authorization to upload contract code on behalf of you
    StoreCode(GrantStoreCodeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GrantContractArgs {
    pub grantee: String,
    /// "execution" or "migration"
    pub kind: String,
    pub contract: String,
    #[command(flatten)]
    pub limit: LimitFlags,
    #[command(flatten)]
    pub filter: FilterFlags,
    /// The Unix timestamp
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub expiration: i64,
}

#[derive(Args, Debug, Clone)]
pub struct GrantStoreCodeArgs {
    pub grantee: String,
    /// Grants in the form `code_hash:permission`
    #[arg(required = true)]
    pub grants: Vec<String>,
    /// The Unix timestamp
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub expiration: i64,
}

/// Instantiate permission flags shared by `store` and
/// `update-instantiate-config`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessConfigFlags {
    /// Any of the addresses can instantiate a contract from the code, optional
    #[arg(long = "instantiate-anyof-addresses", value_delimiter = ',')]
    pub anyof_addresses: Vec<String>,
    /// Removed: use instantiate-anyof-addresses instead
    #[arg(long = "instantiate-only-address", hide = true, default_value = "")]
    pub only_address: String,
    /// Everybody can instantiate a contract from the code, optional
    #[arg(long = "instantiate-everybody", value_parser = parse_bool)]
    pub everybody: Option<bool>,
    /// Nobody except the governance process can instantiate a contract from the code, optional
    #[arg(long = "instantiate-nobody", value_parser = parse_bool)]
    pub nobody: Option<bool>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct InstantiateFlags {
    /// Coins to send to the contract during instantiation
    #[arg(long, default_value = "")]
    pub amount: String,
    /// A human-readable name for this contract in lists
    #[arg(long, default_value = "")]
    pub label: String,
    /// Address or key name of an admin
    #[arg(long, default_value = "")]
    pub admin: String,
    /// You must set this explicitly if you don't want an admin
    #[arg(long)]
    pub no_admin: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct LimitFlags {
    /// Maximal number of calls to the contract
    #[arg(long, default_value_t = 0)]
    pub max_calls: u64,
    /// Maximal amount of tokens transferable to the contract
    #[arg(long, default_value = "")]
    pub max_funds: String,
    /// Don't allow token transfer
    #[arg(long)]
    pub no_token_transfer: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterFlags {
    /// Allowed msg keys
    #[arg(long, value_delimiter = ',')]
    pub allow_msg_keys: Vec<String>,
    /// Allowed raw msgs, repeat the flag for more than one
    #[arg(long)]
    pub allow_raw_msgs: Vec<String>,
    /// Allow all messages
    #[arg(long)]
    pub allow_all_messages: bool,
}

/// Boolean literals as accepted by Go's `strconv.ParseBool`.
pub fn parse_bool(value: &str) -> Result<bool, String> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(format!("boolean value expected, got {value:?}")),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WasmTxHandler;

impl WasmTxHandler {
    /// Build the message for `command` as sent by `from`. Key names given for
    /// the admin are resolved through `keys`.
    pub fn prepare_tx(
        &self,
        command: &WasmTxCli,
        from: AccAddress,
        keys: &impl KeyLookup,
    ) -> Result<Message, TxParseError> {
        let msg = match &command.command {
            WasmCommands::Store(StoreCodeArgs {
                wasm_file,
                permission,
            }) => {
                let wasm =
                    std::fs::read(wasm_file).map_err(|source| TxParseError::ReadWasm {
                        path: wasm_file.clone(),
                        source,
                    })?;
                Message::StoreCode(parse_store_code_args(wasm, from, permission)?)
            }
            WasmCommands::Instantiate(InstantiateArgs {
                code_id,
                json_msg,
                flags,
            }) => Message::Instantiate(parse_instantiate_args(
                code_id, json_msg, keys, from, flags,
            )?),
            WasmCommands::Instantiate2(Instantiate2Args {
                code_id,
                json_msg,
                salt,
                flags,
                salt_encoding,
                fix_msg,
            }) => Message::Instantiate2(parse_instantiate2_args(
                code_id,
                json_msg,
                salt,
                keys,
                from,
                flags,
                salt_encoding,
                *fix_msg,
            )?),
            WasmCommands::Execute(ExecuteArgs {
                contract,
                json_msg,
                amount,
            }) => Message::Execute(parse_execute_args(contract, json_msg, amount, from)?),
            WasmCommands::Migrate(MigrateArgs {
                contract,
                new_code_id,
                json_msg,
            }) => Message::Migrate(parse_migrate_args(contract, new_code_id, json_msg, from)?),
            WasmCommands::SetContractAdmin(SetContractAdminArgs {
                contract,
                new_admin,
            }) => Message::UpdateAdmin(parse_update_admin_args(contract, new_admin, from)?),
            WasmCommands::ClearContractAdmin(ClearContractAdminArgs { contract }) => {
                Message::ClearAdmin(parse_clear_admin_args(contract, from)?)
            }
            WasmCommands::SetContractLabel(SetContractLabelArgs {
                contract,
                new_label,
            }) => Message::UpdateContractLabel(parse_update_label_args(contract, new_label, from)?),
            WasmCommands::UpdateInstantiateConfig(UpdateInstantiateConfigArgs {
                code_id,
                permission,
            }) => Message::UpdateInstantiateConfig(parse_update_instantiate_config_args(
                code_id, permission, from,
            )?),
            WasmCommands::Grant(GrantCli { command }) => match command {
                GrantCommands::Contract(GrantContractArgs {
                    grantee,
                    kind,
                    contract,
                    limit,
                    filter,
                    expiration,
                }) => Message::Grant(parse_contract_grant_args(
                    from,
                    grantee,
                    kind,
                    contract,
                    limit,
                    filter,
                    *expiration,
                )?),
                GrantCommands::StoreCode(GrantStoreCodeArgs {
                    grantee,
                    grants,
                    expiration,
                }) => Message::Grant(parse_store_code_grant_args(
                    from,
                    grantee,
                    grants,
                    *expiration,
                )?),
            },
        };

        Ok(msg)
    }
}

/// Address for `identity`, which is either a bech32 address or the name of a
/// key in `keys`.
pub fn resolve_identity(
    identity: &str,
    keys: &impl KeyLookup,
) -> Result<AccAddress, KeyringError> {
    match AccAddress::from_bech32(identity) {
        Ok(address) => Ok(address),
        Err(_) => {
            let address = keys.resolve(identity)?;
            tracing::debug!("resolved key {identity} to {address}");
            Ok(address)
        }
    }
}

/// Instantiate permission selected by the flags, `None` when the chain
/// default applies.
pub fn parse_access_config_flags(
    flags: &AccessConfigFlags,
) -> Result<Option<AccessConfig>, TxParseError> {
    if !flags.anyof_addresses.is_empty() {
        let addresses = flags
            .anyof_addresses
            .iter()
            .map(|raw| {
                AccAddress::from_bech32(raw).map_err(|source| TxParseError::AnyOfAddress {
                    raw: raw.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        return Ok(Some(AccessConfig::any_of_addresses(addresses)?));
    }

    if !flags.only_address.is_empty() {
        return Err(TxParseError::OnlyAddressRemoved);
    }

    if flags.everybody == Some(true) {
        return Ok(Some(AccessConfig::Everybody));
    }

    if flags.nobody == Some(true) {
        return Ok(Some(AccessConfig::Nobody));
    }

    Ok(None)
}

pub fn parse_store_code_args(
    wasm: Vec<u8>,
    sender: AccAddress,
    flags: &AccessConfigFlags,
) -> Result<MsgStoreCode, TxParseError> {
    let wasm = if wasm.starts_with(WASM_MAGIC) {
        gzip(&wasm)?
    } else if wasm.starts_with(GZIP_MAGIC) {
        wasm
    } else {
        return Err(TxParseError::InvalidWasmFile);
    };

    // size limit applies to the compressed bytes
    let msg = MsgStoreCode {
        sender,
        wasm_byte_code: Binary::from(wasm),
        instantiate_permission: parse_access_config_flags(flags)?,
    };
    msg.validate_basic()?;

    Ok(msg)
}

fn gzip(wasm: &[u8]) -> Result<Vec<u8>, TxParseError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(wasm).map_err(TxParseError::Compress)?;
    encoder.finish().map_err(TxParseError::Compress)
}

pub fn parse_instantiate_args(
    raw_code_id: &str,
    init_msg: &str,
    keys: &impl KeyLookup,
    sender: AccAddress,
    flags: &InstantiateFlags,
) -> Result<MsgInstantiateContract, TxParseError> {
    let code_id = parse_code_id(raw_code_id)?;
    let funds = UnsignedCoins::parse_normalized(&flags.amount).map_err(TxParseError::Amount)?;

    if flags.label.is_empty() {
        return Err(TxParseError::LabelRequired);
    }

    let admin = match (flags.admin.is_empty(), flags.no_admin) {
        (true, false) => return Err(TxParseError::AdminRequired),
        (false, true) => return Err(TxParseError::AdminConflict),
        (true, true) => None,
        (false, false) => {
            Some(resolve_identity(&flags.admin, keys).map_err(TxParseError::Admin)?)
        }
    };

    let msg = MsgInstantiateContract {
        sender,
        admin,
        code_id,
        label: flags.label.clone(),
        msg: Binary::from(init_msg.as_bytes()),
        funds,
    };
    msg.validate_basic()?;

    Ok(msg)
}

/// Like [`parse_instantiate_args`] with the salt decoded up front.
pub fn parse_instantiate2_args(
    raw_code_id: &str,
    init_msg: &str,
    salt: &str,
    keys: &impl KeyLookup,
    sender: AccAddress,
    flags: &InstantiateFlags,
    salt_encoding: &SaltEncodingFlags,
    fix_msg: bool,
) -> Result<MsgInstantiateContract2, TxParseError> {
    let salt = salt_encoding.decode(salt)?;
    let msg = parse_instantiate_args(raw_code_id, init_msg, keys, sender, flags)?;

    Ok(MsgInstantiateContract2::from_instantiate(msg, salt, fix_msg))
}

/// The contract address is passed through as given.
pub fn parse_execute_args(
    contract: &str,
    exec_msg: &str,
    amount: &str,
    sender: AccAddress,
) -> Result<MsgExecuteContract, TxParseError> {
    let funds = UnsignedCoins::parse_normalized(amount).map_err(TxParseError::Amount)?;

    Ok(MsgExecuteContract {
        sender,
        contract: contract.to_owned(),
        msg: Binary::from(exec_msg.as_bytes()),
        funds,
    })
}

pub fn parse_migrate_args(
    contract: &str,
    raw_code_id: &str,
    migrate_msg: &str,
    sender: AccAddress,
) -> Result<MsgMigrateContract, TxParseError> {
    let msg = MsgMigrateContract {
        sender,
        contract: parse_address("contract", contract)?,
        code_id: parse_code_id(raw_code_id)?,
        msg: Binary::from(migrate_msg.as_bytes()),
    };
    msg.validate_basic()?;

    Ok(msg)
}

pub fn parse_update_admin_args(
    contract: &str,
    new_admin: &str,
    sender: AccAddress,
) -> Result<MsgUpdateAdmin, TxParseError> {
    let msg = MsgUpdateAdmin {
        sender,
        new_admin: parse_address("new admin", new_admin)?,
        contract: parse_address("contract", contract)?,
    };
    msg.validate_basic()?;

    Ok(msg)
}

pub fn parse_clear_admin_args(
    contract: &str,
    sender: AccAddress,
) -> Result<MsgClearAdmin, TxParseError> {
    let msg = MsgClearAdmin {
        sender,
        contract: parse_address("contract", contract)?,
    };
    msg.validate_basic()?;

    Ok(msg)
}

pub fn parse_update_label_args(
    contract: &str,
    new_label: &str,
    sender: AccAddress,
) -> Result<MsgUpdateContractLabel, TxParseError> {
    let msg = MsgUpdateContractLabel {
        sender,
        new_label: new_label.to_owned(),
        contract: parse_address("contract", contract)?,
    };
    msg.validate_basic()?;

    Ok(msg)
}

pub fn parse_update_instantiate_config_args(
    raw_code_id: &str,
    flags: &AccessConfigFlags,
    sender: AccAddress,
) -> Result<MsgUpdateInstantiateConfig, TxParseError> {
    let msg = MsgUpdateInstantiateConfig {
        sender,
        code_id: parse_code_id(raw_code_id)?,
        new_instantiate_permission: parse_access_config_flags(flags)?,
    };
    msg.validate_basic()?;

    Ok(msg)
}

/// Limit selected by the flag combination. Funds and calls together form a
/// combined limit; calls alone require `--no-token-transfer`.
pub fn resolve_limit(flags: &LimitFlags) -> Result<ContractAuthzLimit, TxParseError> {
    let has_funds = !flags.max_funds.is_empty();
    let has_calls = flags.max_calls != 0;

    match (has_funds, has_calls, flags.no_token_transfer) {
        (true, true, false) => Ok(ContractAuthzLimit::combined(
            flags.max_calls,
            parse_max_funds(&flags.max_funds)?,
        )),
        (true, false, false) => Ok(ContractAuthzLimit::max_funds(parse_max_funds(
            &flags.max_funds,
        )?)),
        (false, true, true) => Ok(ContractAuthzLimit::max_calls(flags.max_calls)),
        _ => Err(TxParseError::InvalidLimit),
    }
}

/// Exactly one filter flag must be set.
pub fn resolve_filter(flags: &FilterFlags) -> Result<ContractAuthzFilter, TxParseError> {
    let has_keys = !flags.allow_msg_keys.is_empty();
    let has_raw = !flags.allow_raw_msgs.is_empty();

    match (flags.allow_all_messages, has_keys, has_raw) {
        (true, false, false) => Ok(ContractAuthzFilter::AllowAll),
        (false, true, false) => Ok(ContractAuthzFilter::accepted_keys(
            flags.allow_msg_keys.iter().cloned(),
        )),
        (false, false, true) => Ok(ContractAuthzFilter::accepted_messages(
            flags.allow_raw_msgs.iter().map(|m| m.as_bytes().to_vec()),
        )),
        (false, false, false) => Err(TxParseError::InvalidFilter),
        _ => Err(TxParseError::MultipleFilters),
    }
}

/// Grant `grantee` execution or migration rights on `contract`.
pub fn parse_contract_grant_args(
    granter: AccAddress,
    grantee: &str,
    kind: &str,
    contract: &str,
    limit: &LimitFlags,
    filter: &FilterFlags,
    expiration: i64,
) -> Result<MsgGrant, TxParseError> {
    let grantee = parse_address("grantee", grantee)?;
    let contract = parse_address("contract", contract)?;

    if expiration == 0 {
        return Err(TxParseError::ExpirationRequired);
    }

    let limit = resolve_limit(limit)?;
    let filter = resolve_filter(filter)?;
    let grant = ContractGrant::new(contract, limit, filter)?;

    let authorization = match kind {
        "execution" => Authorization::ContractExecution {
            grants: vec![grant],
        },
        "migration" => Authorization::ContractMigration {
            grants: vec![grant],
        },
        _ => return Err(TxParseError::UnsupportedAuthorization(kind.to_owned())),
    };

    tracing::debug!(
        "granting {} to {grantee} by {granter}",
        authorization.type_url()
    );

    Ok(MsgGrant {
        granter,
        grantee,
        grant: Grant {
            authorization,
            expiration: expiration_time(expiration)?,
        },
    })
}

/// Grant `grantee` the right to upload the listed code. The grants are not
/// validated as a set here.
pub fn parse_store_code_grant_args(
    granter: AccAddress,
    grantee: &str,
    tokens: &[String],
    expiration: i64,
) -> Result<MsgGrant, TxParseError> {
    let grantee = parse_address("grantee", grantee)?;
    let grants = parse_store_code_grants(tokens)?;
    let expiration = expiration_time(expiration)?;

    tracing::debug!("granting {} code uploads to {grantee}", grants.len());

    Ok(MsgGrant {
        granter,
        grantee,
        grant: Grant {
            authorization: Authorization::StoreCode { grants },
            expiration,
        },
    })
}

/// Parse `code_hash:permission` tokens. The permission is `*`, `everybody`,
/// `nobody` or a comma separated address list. Order is kept and repeated
/// hashes are passed through.
pub fn parse_store_code_grants(tokens: &[String]) -> Result<Vec<CodeGrant>, TxParseError> {
    tokens
        .iter()
        .map(|token| match token.split(':').collect::<Vec<_>>().as_slice() {
            [hash, "*"] => Ok(CodeGrant {
                code_hash: hash.as_bytes().to_vec(),
                instantiate_permission: None,
            }),
            [hash, policy] => Ok(CodeGrant {
                code_hash: hash.as_bytes().to_vec(),
                instantiate_permission: Some(parse_policy(policy)?),
            }),
            _ => Err(TxParseError::InvalidGrantFormat),
        })
        .collect()
}

fn parse_policy(policy: &str) -> Result<AccessConfig, TxParseError> {
    match policy {
        "everybody" => Ok(AccessConfig::Everybody),
        "nobody" => Ok(AccessConfig::Nobody),
        list => {
            let addresses = list
                .split(',')
                .map(|raw| {
                    AccAddress::from_bech32(raw).map_err(|source| TxParseError::PolicyAddress {
                        raw: raw.to_owned(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(AccessConfig::any_of_addresses(addresses)?)
        }
    }
}

/// `0` means no expiration.
pub fn expiration_time(seconds: i64) -> Result<Option<DateTime<Utc>>, TxParseError> {
    if seconds == 0 {
        return Ok(None);
    }

    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(Some)
        .ok_or(TxParseError::Expiration(seconds))
}

fn parse_code_id(raw: &str) -> Result<u64, TxParseError> {
    raw.parse().map_err(|source| TxParseError::CodeId {
        raw: raw.to_owned(),
        source,
    })
}

fn parse_max_funds(raw: &str) -> Result<UnsignedCoins, TxParseError> {
    UnsignedCoins::parse_normalized(raw).map_err(TxParseError::MaxFunds)
}

fn parse_address(field: &'static str, raw: &str) -> Result<AccAddress, TxParseError> {
    AccAddress::from_bech32(raw).map_err(|source| TxParseError::Address {
        field,
        raw: raw.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;
    use crate::{error::WasmError, message::MAX_WASM_SIZE};

    #[test]
    fn go_bool_grammar() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(raw), Ok(true), "{raw}");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(raw), Ok(false), "{raw}");
        }
        assert!(parse_bool("yes").is_err());
        assert!(parse_bool("").is_err());
    }

    #[test]
    fn expiration_zero_is_none() {
        assert_eq!(expiration_time(0).unwrap(), None);

        let time = expiration_time(1667979596).unwrap().unwrap();
        assert_eq!(time.timestamp(), 1667979596);

        assert!(matches!(
            expiration_time(i64::MAX),
            Err(TxParseError::Expiration(i64::MAX))
        ));
    }

    #[test]
    fn limit_table() {
        let flags = |max_calls, max_funds: &str, no_token_transfer| LimitFlags {
            max_calls,
            max_funds: max_funds.to_owned(),
            no_token_transfer,
        };

        assert!(matches!(
            resolve_limit(&flags(5, "100uwasm", false)),
            Ok(ContractAuthzLimit::Combined {
                calls_remaining: 5,
                ..
            })
        ));
        assert!(matches!(
            resolve_limit(&flags(0, "100uwasm", false)),
            Ok(ContractAuthzLimit::MaxFunds { .. })
        ));
        assert_eq!(
            resolve_limit(&flags(5, "", true)).unwrap(),
            ContractAuthzLimit::max_calls(5)
        );

        for (calls, funds, no_transfer) in [
            (0, "", false),
            (0, "", true),
            (5, "", false),
            (5, "100uwasm", true),
            (0, "100uwasm", true),
        ] {
            assert!(matches!(
                resolve_limit(&flags(calls, funds, no_transfer)),
                Err(TxParseError::InvalidLimit)
            ));
        }
    }

    #[test]
    fn max_funds_syntax_error() {
        let err = resolve_limit(&LimitFlags {
            max_calls: 0,
            max_funds: "abc".to_owned(),
            no_token_transfer: false,
        })
        .unwrap_err();

        assert!(err.to_string().starts_with("max funds: "), "{err}");
    }

    #[test]
    fn filter_table() {
        let keys = vec!["foo".to_owned()];
        let raw = vec![r#"{"foo":"bar"}"#.to_owned()];

        let flags = |all, keys: &[String], raw: &[String]| FilterFlags {
            allow_msg_keys: keys.to_vec(),
            allow_raw_msgs: raw.to_vec(),
            allow_all_messages: all,
        };

        assert_eq!(
            resolve_filter(&flags(true, &[], &[])).unwrap(),
            ContractAuthzFilter::AllowAll
        );
        assert_eq!(
            resolve_filter(&flags(false, &keys, &[])).unwrap(),
            ContractAuthzFilter::accepted_keys(["foo"])
        );
        assert_eq!(
            resolve_filter(&flags(false, &[], &raw)).unwrap(),
            ContractAuthzFilter::accepted_messages([br#"{"foo":"bar"}"#.to_vec()])
        );
        assert!(matches!(
            resolve_filter(&flags(false, &[], &[])),
            Err(TxParseError::InvalidFilter)
        ));
        for (all, k, r) in [
            (true, &keys[..], &[][..]),
            (true, &[][..], &raw[..]),
            (false, &keys[..], &raw[..]),
            (true, &keys[..], &raw[..]),
        ] {
            assert!(matches!(
                resolve_filter(&flags(all, k, r)),
                Err(TxParseError::MultipleFilters)
            ));
        }
    }

    #[test]
    fn access_flags_precedence() {
        let addr = "cosmos1syavy2npfyt9tcncdtsdzf7kny9lh777pahuux";

        let flags = AccessConfigFlags {
            anyof_addresses: vec![addr.to_owned()],
            only_address: "ignored".to_owned(),
            everybody: Some(true),
            nobody: Some(true),
        };
        assert_eq!(
            parse_access_config_flags(&flags).unwrap().unwrap().addresses(),
            &[AccAddress::from_bech32(addr).unwrap()]
        );

        let flags = AccessConfigFlags {
            only_address: addr.to_owned(),
            everybody: Some(true),
            ..Default::default()
        };
        assert!(matches!(
            parse_access_config_flags(&flags),
            Err(TxParseError::OnlyAddressRemoved)
        ));

        let flags = AccessConfigFlags {
            everybody: Some(false),
            nobody: Some(true),
            ..Default::default()
        };
        assert_eq!(
            parse_access_config_flags(&flags).unwrap(),
            Some(AccessConfig::Nobody)
        );

        let flags = AccessConfigFlags {
            everybody: Some(false),
            nobody: Some(false),
            ..Default::default()
        };
        assert_eq!(parse_access_config_flags(&flags).unwrap(), None);
        assert_eq!(
            parse_access_config_flags(&AccessConfigFlags::default()).unwrap(),
            None
        );
    }

    #[test]
    fn duplicate_anyof_addresses_fail() {
        let addr = "cosmos1syavy2npfyt9tcncdtsdzf7kny9lh777pahuux".to_owned();
        let flags = AccessConfigFlags {
            anyof_addresses: vec![addr.clone(), addr],
            ..Default::default()
        };

        assert!(matches!(
            parse_access_config_flags(&flags),
            Err(TxParseError::Validation(_))
        ));
    }

    #[test]
    fn store_code_requires_wasm_or_gzip() {
        let sender = AccAddress::from_bech32("cosmos1syavy2npfyt9tcncdtsdzf7kny9lh777pahuux")
            .unwrap();
        let flags = AccessConfigFlags::default();

        let msg = parse_store_code_args(b"\0asm\x01\0\0\0".to_vec(), sender.clone(), &flags)
            .unwrap();
        assert!(msg.wasm_byte_code.starts_with(GZIP_MAGIC));
        let mut raw = Vec::new();
        flate2::read::GzDecoder::new(msg.wasm_byte_code.as_slice())
            .read_to_end(&mut raw)
            .unwrap();
        assert_eq!(raw, b"\0asm\x01\0\0\0".to_vec());

        let msg = parse_store_code_args(vec![0x1f, 0x8b, 0x08], sender.clone(), &flags).unwrap();
        assert_eq!(msg.wasm_byte_code.as_slice(), &[0x1f, 0x8b, 0x08]);

        assert!(matches!(
            parse_store_code_args(b"not wasm".to_vec(), sender, &flags),
            Err(TxParseError::InvalidWasmFile)
        ));
    }

    #[test]
    fn store_code_limit_applies_after_compression() {
        let sender = AccAddress::from_bech32("cosmos1syavy2npfyt9tcncdtsdzf7kny9lh777pahuux")
            .unwrap();
        let mut wasm = b"\0asm\x01\0\0\0".to_vec();
        wasm.resize(900 * 1024, 0);
        assert!(wasm.len() > MAX_WASM_SIZE);

        let msg = parse_store_code_args(wasm, sender.clone(), &AccessConfigFlags::default())
            .unwrap();
        assert!(msg.wasm_byte_code.len() < MAX_WASM_SIZE);

        let mut gzipped = GZIP_MAGIC.to_vec();
        gzipped.resize(MAX_WASM_SIZE + 1, 0);
        assert!(matches!(
            parse_store_code_args(gzipped, sender, &AccessConfigFlags::default()),
            Err(TxParseError::Validation(WasmError::Limit { .. }))
        ));
    }
}
