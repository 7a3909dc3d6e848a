//! CosmWasm module interface.
//!
//! This crate exposes the transaction messages of the wasm module, the
//! permission and authorization types they carry and, behind the `cli`
//! feature, the builders that turn command line input into messages. The
//! message set mirrors [`wasmd`](https://github.com/CosmWasm/wasmd).

pub mod client;
pub mod error;
pub mod message;
pub mod types;

pub use error::WasmError;
pub use message::Message;
