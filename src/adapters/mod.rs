//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - DexScreener: public pair data, first provider in the lookup chain
//! - Defined: authenticated token data, fallback provider
//! - CLI: Command-line interface handlers

pub mod dexscreener;
pub mod defined;
pub mod cli;

pub use dexscreener::DexScreenerClient;
pub use defined::DefinedClient;
pub use cli::CliApp;
