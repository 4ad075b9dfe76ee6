//! token-lookup - Token market data with provider fallback
//!
//! Fetches price, liquidity, volume and market cap for a token from
//! DexScreener, falling back to Defined.fi, and normalizes both into one
//! `TokenData` shape.
//!
//! # Modules
//!
//! - `domain`: Normalized types (TokenLookupOptions, TokenData, TokenLookupResponse)
//! - `ports`: Trait abstractions (TokenInfoPort, CredentialProvider)
//! - `adapters`: External implementations (DexScreener, Defined, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Lookup orchestrator and entry points
//!
//! # Example
//!
//! ```rust,ignore
//! use token_lookup::{get_token_info, TokenLookupOptions};
//!
//! let options = TokenLookupOptions::new("9BB6NFEcjBCtnNLFko2FqVQBq8HHM13kCyYcdQbgpump")
//!     .with_chain("solana");
//! let result = get_token_info(&options).await;
//! if let Some(data) = result.data() {
//!     println!("{} ${} via {}", data.symbol, data.price.usd, data.source);
//! }
//! ```

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;

pub use application::{
    get_defined_token_info, get_dexscreener_token_info, get_token_info, TokenLookup,
};
pub use domain::{
    ChainId, Liquidity, TokenData, TokenLookupOptions, TokenLookupResponse, TokenPrice,
    TokenSource,
};
