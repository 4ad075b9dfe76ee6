//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Token data providers (DexScreener, Defined)
//! - API credential sources (environment, static)

pub mod token_info;
pub mod credentials;
pub mod mocks;

pub use token_info::TokenInfoPort;
pub use credentials::{CredentialProvider, EnvCredentials, StaticCredentials, DEFINED_API_KEY_ENV};
pub use mocks::MockTokenInfo;
