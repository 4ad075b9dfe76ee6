//! Defined.fi Adapter
//!
//! Authenticated token lookup; the key is sent as `X-API-KEY` and read
//! from `DEFINED_API_KEY` unless another `CredentialProvider` is supplied.

mod client;
mod types;

pub use client::{DefinedClient, DefinedConfig, DefinedError, DEFINED_BASE_URL};
pub use types::DefinedToken;
