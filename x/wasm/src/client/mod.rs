//! Client-facing interfaces for the CosmWasm module.
//!
//! Semantics follow the command line client of
//! [`wasmd`](https://github.com/CosmWasm/wasmd/tree/main/x/wasm/client/cli).
#[cfg(feature = "cli")]
pub mod cli;
