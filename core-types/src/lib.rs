//! Primitive ledger types shared by the wasm module and its client.

pub mod coin;
pub mod coins;
pub mod denom;
pub mod errors;

pub use coin::UnsignedCoin;
pub use coins::UnsignedCoins;
pub use denom::Denom;
