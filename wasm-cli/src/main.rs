use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Args, Parser, Subcommand};
use keyring::FileKeyring;
use tracing::Level;
use wasm::client::cli::{
    tx::{resolve_identity, TxSubmitter, WasmTxCli, WasmTxHandler},
    TxParseError,
};

use crate::{
    config::{default_home, ClientConfig, OutputFormat},
    submit::GenerateOnly,
};

mod config;
mod submit;

#[derive(Parser, Debug)]
#[command(name = "wasmcli", version, about = "Build CosmWasm transactions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Directory for config and keyring
    #[arg(long, global = true)]
    home: Option<PathBuf>,
    /// Directory holding key records, overrides the config file
    #[arg(long, global = true)]
    keyring_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    chain_id: Option<String>,
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,
    #[arg(long, global = true, default_value_t = Level::WARN)]
    log_level: Level,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transaction subcommands
    Tx(TxCli),
}

#[derive(Args, Debug)]
struct TxCli {
    #[command(subcommand)]
    command: TxCommands,
    /// Name or address of the signing key
    #[arg(long, global = true)]
    from: Option<String>,
}

#[derive(Subcommand, Debug)]
enum TxCommands {
    /// Wasm transaction subcommands
    Wasm(WasmTxCli),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging_init(cli.log_level);

    run(cli)
}

fn logging_init(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let home = cli.home.unwrap_or_else(default_home);
    let mut config = ClientConfig::load(&home)?;

    if let Some(dir) = cli.keyring_dir {
        config.keyring_dir = Some(dir);
    }
    if let Some(chain_id) = cli.chain_id {
        config.chain_id = Some(chain_id);
    }
    if let Some(output) = cli.output {
        config.output = output;
    }

    match cli.command {
        Commands::Tx(TxCli {
            command: TxCommands::Wasm(command),
            from,
        }) => {
            let from = from.ok_or_else(|| anyhow!("--from is required for transactions"))?;
            let keyring = FileKeyring::new(config.keyring_dir(&home));
            let sender = resolve_identity(&from, &keyring).map_err(TxParseError::Sender)?;

            let msg = WasmTxHandler.prepare_tx(&command, sender, &keyring)?;

            let submitter = GenerateOnly {
                chain_id: config.chain_id,
                output: config.output,
            };
            println!("{}", submitter.submit(msg)?);
        }
    }

    Ok(())
}
