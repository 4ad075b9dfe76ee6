//! CLI Adapter
//!
//! Command-line interface for the token lookup tool.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{
    resolve_config, BoostsCmd, CliApp, Command, LookupCmd, OrdersCmd, PairCmd, PairsCmd,
    ProviderChoice, SearchCmd,
};

use anyhow::Result;

use crate::config::Config;

/// Initialize the CLI application
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}

/// Execute the CLI command
pub async fn execute(app: CliApp, config: &Config) -> Result<bool> {
    commands::execute(app, config).await
}
