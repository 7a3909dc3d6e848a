use address::AccAddress;
use assert_fs::prelude::*;
use clap::Parser;
use flate2::read::GzDecoder;
use std::io::Read;
use keyring::MemoryKeyring;
use wasm::client::cli::{
    tx::{GrantCommands, WasmCommands, WasmTxCli, WasmTxHandler},
    ErrorKind,
};
use wasm::message::Message;
use wasm::types::AccessConfig;

const SENDER: &str = "cosmos1syavy2npfyt9tcncdtsdzf7kny9lh777pahuux";
const GRANTEE: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";
const CONTRACT: &str = "cosmos1qurswpc8qurswpc8qurswpc8qurswpc8qurswpc8qurswpc8qurs79d55s";

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: WasmCommands,
}

fn parse(args: &[&str]) -> Result<WasmTxCli, clap::Error> {
    Cli::try_parse_from(std::iter::once("wasm").chain(args.iter().copied()))
        .map(|cli| WasmTxCli { command: cli.command })
}

fn prepare(cli: &WasmTxCli) -> Result<Message, wasm::client::cli::TxParseError> {
    WasmTxHandler.prepare_tx(
        cli,
        AccAddress::from_bech32(SENDER).unwrap(),
        &MemoryKeyring::new(),
    )
}

#[test]
fn tri_state_flags_use_go_bool_grammar() {
    let cli = parse(&["store", "code.wasm", "--instantiate-everybody", "T"]).unwrap();
    let WasmCommands::Store(args) = cli.command else {
        panic!("expected store");
    };
    assert_eq!(args.permission.everybody, Some(true));
    assert_eq!(args.permission.nobody, None);

    let err = parse(&["store", "code.wasm", "--instantiate-nobody", "maybe"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[test]
fn anyof_addresses_split_on_commas() {
    let list = format!("{SENDER},{GRANTEE}");
    let cli = parse(&["store", "code.wasm", "--instantiate-anyof-addresses", list.as_str()]).unwrap();
    let WasmCommands::Store(args) = cli.command else {
        panic!("expected store");
    };
    assert_eq!(args.permission.anyof_addresses, vec![SENDER, GRANTEE]);
}

#[test]
fn store_reads_wasm_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("code.wasm");
    file.write_binary(b"\0asm\x01\0\0\0").unwrap();

    let path = file.path().to_string_lossy().into_owned();
    let cli = parse(&["store", path.as_str(), "--instantiate-nobody", "true"]).unwrap();

    let Message::StoreCode(msg) = prepare(&cli).unwrap() else {
        panic!("expected store code");
    };
    let mut raw = Vec::new();
    GzDecoder::new(msg.wasm_byte_code.as_slice())
        .read_to_end(&mut raw)
        .unwrap();
    assert_eq!(raw, b"\0asm\x01\0\0\0".to_vec());
    assert_eq!(msg.instantiate_permission, Some(AccessConfig::Nobody));

    let text = dir.child("code.txt");
    text.write_str("hello").unwrap();
    let path = text.path().to_string_lossy().into_owned();
    let err = prepare(&parse(&["store", path.as_str()]).unwrap()).unwrap_err();
    assert_eq!(err.to_string(), "invalid input file. Use wasm binary or gzip");

    let missing = dir.child("missing.wasm");
    let path = missing.path().to_string_lossy().into_owned();
    let err = prepare(&parse(&["store", path.as_str()]).unwrap()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn instantiate_through_handler() {
    let cli = parse(&[
        "instantiate",
        "12",
        r#"{"count":0}"#,
        "--label",
        "counter",
        "--no-admin",
        "--amount",
        "10uwasm",
    ])
    .unwrap();

    let Message::Instantiate(msg) = prepare(&cli).unwrap() else {
        panic!("expected instantiate");
    };
    assert_eq!(msg.code_id, 12);
    assert_eq!(msg.funds.to_string(), "10uwasm");
    assert_eq!(msg.admin, None);
}

#[test]
fn instantiate_aliases() {
    for alias in ["start", "init", "inst", "i"] {
        let cli = parse(&[alias, "3", "{}", "--label", "counter", "--no-admin"]).unwrap();
        assert!(
            matches!(prepare(&cli).unwrap(), Message::Instantiate(_)),
            "{alias}"
        );
    }
}

#[test]
fn instantiate2_salt_selectors() {
    let cli = parse(&[
        "instantiate2",
        "1",
        "{}",
        "my-salt",
        "--ascii",
        "--label",
        "salted",
        "--no-admin",
        "--fix-msg",
    ])
    .unwrap();

    let Message::Instantiate2(msg) = prepare(&cli).unwrap() else {
        panic!("expected instantiate2");
    };
    assert_eq!(msg.salt.as_slice(), b"my-salt");
    assert!(msg.fix_msg);
}

#[test]
fn grant_contract_flags() {
    let raw_msg = r#"{"foo":"bar","baz":1}"#;
    let cli = parse(&[
        "grant",
        "contract",
        GRANTEE,
        "execution",
        CONTRACT,
        "--allow-raw-msgs",
        raw_msg,
        "--max-calls",
        "3",
        "--no-token-transfer",
        "--expiration",
        "1667979596",
    ])
    .unwrap();

    let WasmCommands::Grant(grant) = &cli.command else {
        panic!("expected grant");
    };
    let GrantCommands::Contract(args) = &grant.command else {
        panic!("expected contract grant");
    };
    assert_eq!(args.filter.allow_raw_msgs, vec![raw_msg]);

    let Message::Grant(msg) = prepare(&cli).unwrap() else {
        panic!("expected grant");
    };
    assert_eq!(msg.granter.to_string(), SENDER);
    assert_eq!(msg.grant.expiration.unwrap().timestamp(), 1667979596);

    let cli = parse(&[
        "grant",
        "contract",
        GRANTEE,
        "execution",
        CONTRACT,
        "--allow-msg-keys",
        "a,b",
        "--max-calls",
        "3",
        "--no-token-transfer",
    ])
    .unwrap();
    let err = prepare(&cli).unwrap_err();
    assert_eq!(err.to_string(), "expiration must be set");
}

#[test]
fn grant_store_code_needs_a_token() {
    assert!(parse(&["grant", "store-code", GRANTEE]).is_err());

    let cli = parse(&["grant", "store-code", GRANTEE, "abc:*", "def:nobody"]).unwrap();
    let Message::Grant(msg) = prepare(&cli).unwrap() else {
        panic!("expected grant");
    };
    assert_eq!(msg.grant.expiration, None);
    assert!(msg.validate_basic().is_ok());
}
