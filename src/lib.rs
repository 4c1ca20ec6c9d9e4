//! # Batch Mint
//!
//! Composes batched writes against a smart contract: resolves per-item metadata concurrently,
//! encodes one call per item and bundles the ordered calls into a single `multicall`
//! transaction.

pub mod cli;
pub mod compose;
pub mod config;
pub mod constants;
pub mod detect;
pub mod encode;
pub mod error;
pub mod metrics;
pub mod resolve;
pub mod serde;
pub mod submit;
pub mod types;
