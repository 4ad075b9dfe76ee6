//! CLI Command Handlers
//!
//! Implementation of all CLI commands for the token lookup tool.

use clap::{Parser, Subcommand, ValueEnum};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::adapters::defined::{DefinedClient, DefinedConfig};
use crate::adapters::dexscreener::{DexScreenerClient, DexScreenerConfig};
use crate::application::TokenLookup;
use crate::config::{load_config, Config};
use crate::domain::{ChainId, TokenLookupOptions, TokenLookupResponse};
use crate::ports::TokenInfoPort;

/// token-lookup - Token market data from DexScreener and Defined.fi
#[derive(Parser, Debug)]
#[command(
    name = "token-lookup",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Token market data from DexScreener and Defined.fi",
    long_about = "Looks up token price, liquidity, volume and market cap. DexScreener is \
                  queried first; Defined.fi is used as a fallback when DEFINED_API_KEY is set."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up normalized token data
    Lookup(LookupCmd),

    /// Latest DexScreener token profiles
    Profiles,

    /// DexScreener boosted tokens
    Boosts(BoostsCmd),

    /// Paid DexScreener orders for a token
    Orders(OrdersCmd),

    /// Search DexScreener pairs
    Search(SearchCmd),

    /// DexScreener pairs for a token on one chain
    Pairs(PairsCmd),

    /// A single DexScreener pair
    Pair(PairCmd),
}

/// Which provider(s) to ask
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProviderChoice {
    /// DexScreener, then Defined
    #[default]
    Auto,
    Dexscreener,
    Defined,
}

#[derive(Parser, Debug)]
pub struct LookupCmd {
    /// Token address
    pub address: String,

    /// Chain id (name or number); DexScreener defaults to solana
    #[arg(long, value_name = "ID")]
    pub chain: Option<String>,

    /// Provider to query
    #[arg(long, value_enum, default_value_t = ProviderChoice::Auto)]
    pub provider: ProviderChoice,
}

impl LookupCmd {
    pub fn options(&self) -> TokenLookupOptions {
        let mut options = TokenLookupOptions::new(self.address.clone());
        if let Some(chain) = &self.chain {
            options = options.with_chain(ChainId::parse(chain));
        }
        options
    }
}

#[derive(Parser, Debug)]
pub struct BoostsCmd {
    /// Tokens with the most active boosts instead of the latest
    #[arg(long)]
    pub top: bool,
}

#[derive(Parser, Debug)]
pub struct OrdersCmd {
    /// Chain id, e.g. solana
    pub chain: String,
    /// Token address
    pub token: String,
}

#[derive(Parser, Debug)]
pub struct SearchCmd {
    /// Address, symbol or name
    pub query: String,

    /// Restrict to one chain
    #[arg(long, value_name = "ID")]
    pub chain: Option<String>,
}

#[derive(Parser, Debug)]
pub struct PairsCmd {
    /// Token address
    pub token: String,

    #[arg(long, value_name = "ID")]
    pub chain: String,
}

#[derive(Parser, Debug)]
pub struct PairCmd {
    /// Pair address
    pub pair: String,

    #[arg(long, value_name = "ID")]
    pub chain: String,
}

/// Load the config file when one was given, otherwise defaults plus env
pub fn resolve_config(app: &CliApp) -> Result<Config> {
    match &app.config {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
            load_config(&expanded).with_context(|| format!("Failed to load configuration from {}", expanded))
        }
        None => Ok(Config::from_env()),
    }
}

/// Execute the parsed command. Returns `false` when a lookup came back unsuccessful.
pub async fn execute(app: CliApp, config: &Config) -> Result<bool> {
    let dexscreener = DexScreenerClient::with_config(DexScreenerConfig::from(&config.dexscreener))
        .context("Failed to create DexScreener client")?;

    match app.command {
        Command::Lookup(cmd) => {
            let defined = DefinedClient::with_config(
                DefinedConfig::from(&config.defined),
                config.defined.credentials(),
            )
            .context("Failed to create Defined client")?;

            let response = run_lookup(&cmd, dexscreener, defined).await;
            print_json(&response)?;
            Ok(response.is_success())
        }
        Command::Profiles => {
            print_json(&dexscreener.get_token_profiles().await?)?;
            Ok(true)
        }
        Command::Boosts(cmd) => {
            let boosts = if cmd.top {
                dexscreener.get_top_boosts().await?
            } else {
                dexscreener.get_latest_boosts().await?
            };
            print_json(&boosts)?;
            Ok(true)
        }
        Command::Orders(cmd) => {
            print_json(&dexscreener.get_token_orders(&cmd.chain, &cmd.token).await?)?;
            Ok(true)
        }
        Command::Search(cmd) => {
            print_json(&dexscreener.search_pairs(&cmd.query, cmd.chain.as_deref()).await?)?;
            Ok(true)
        }
        Command::Pairs(cmd) => {
            print_json(&dexscreener.get_pairs(&cmd.token, &cmd.chain).await?)?;
            Ok(true)
        }
        Command::Pair(cmd) => {
            let pair = dexscreener.get_pair(&cmd.pair, &cmd.chain).await;
            let found = pair.is_some();
            print_json(&pair)?;
            Ok(found)
        }
    }
}

async fn run_lookup(
    cmd: &LookupCmd,
    dexscreener: DexScreenerClient,
    defined: DefinedClient,
) -> TokenLookupResponse {
    let options = cmd.options();

    match cmd.provider {
        ProviderChoice::Auto => TokenLookup::from_clients(dexscreener, defined).lookup(&options).await,
        ProviderChoice::Dexscreener => dexscreener.fetch(&options).await,
        ProviderChoice::Defined => defined.fetch(&options).await,
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}
