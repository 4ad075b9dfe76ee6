//! Domain Layer - Provider-independent token types
//!
//! Everything an adapter produces and a caller consumes:
//! - `TokenLookupOptions`: what to look up
//! - `TokenData`: normalized market data
//! - `TokenLookupResponse`: success/failure envelope

pub mod token;

pub use token::{
    ChainId, Liquidity, TokenData, TokenLookupOptions, TokenLookupResponse, TokenPrice,
    TokenSource, DEFAULT_CHAIN_ID, UNKNOWN_ERROR,
};
