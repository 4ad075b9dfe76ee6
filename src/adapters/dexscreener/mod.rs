//! DexScreener Adapter
//!
//! Public DexScreener API (no key required):
//! - `/tokens/v1/{chainId}/{address}`: normalized token lookup, first in the fallback chain
//! - Token profiles, boosts and paid orders (passthrough)
//! - Pair search and single-pair lookup (passthrough)
//!
//! # Example
//!
//! ```rust,ignore
//! use token_lookup::adapters::dexscreener::DexScreenerClient;
//! use token_lookup::domain::TokenLookupOptions;
//! use token_lookup::ports::TokenInfoPort;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DexScreenerClient::new()?;
//!
//!     let options = TokenLookupOptions::new("9BB6NFEcjBCtnNLFko2FqVQBq8HHM13kCyYcdQbgpump");
//!     let result = client.fetch(&options).await;
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//!
//!     let pairs = client.search_pairs("SOL", Some("solana")).await?;
//!     println!("{} pairs", pairs.len());
//!     Ok(())
//! }
//! ```

mod client;
mod types;

pub use client::{DexScreenerClient, DexScreenerConfig, DexScreenerError, DEXSCREENER_BASE_URL};
pub use types::{
    parse_price_usd, DexScreenerPair, DexScreenerSearchResponse, PairBoosts, PairInfo,
    PairLiquidity, PairSocial, PairToken, PairWebsite, TokenBoost, TokenLink, TokenOrder,
    TokenProfile, TxnCounts,
};
