//! Token Lookup Orchestrator
//!
//! Runs the provider chain in order and returns the first success.
//! Providers are awaited one after another, never concurrently; when all
//! of them fail the last failure is returned as-is.

use std::sync::{Arc, OnceLock};

use crate::adapters::defined::{DefinedClient, DefinedConfig};
use crate::adapters::dexscreener::{DexScreenerClient, DexScreenerConfig};
use crate::config::Config;
use crate::domain::{TokenLookupOptions, TokenLookupResponse};
use crate::ports::{CredentialProvider, TokenInfoPort};

const NO_PROVIDERS: &str = "No token info providers configured";

/// Ordered fallback chain of token data providers
#[derive(Clone, Default)]
pub struct TokenLookup {
    providers: Vec<Arc<dyn TokenInfoPort>>,
}

impl TokenLookup {
    /// Empty chain; add providers with [`TokenLookup::with_provider`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider; it is consulted after every provider added before it
    pub fn with_provider(mut self, provider: Arc<dyn TokenInfoPort>) -> Self {
        self.providers.push(provider);
        self
    }

    /// DexScreener first, then Defined
    pub fn from_clients(dexscreener: DexScreenerClient, defined: DefinedClient) -> Self {
        Self::new()
            .with_provider(Arc::new(dexscreener))
            .with_provider(Arc::new(defined))
    }

    /// Default chain built from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let dexscreener = DexScreenerClient::with_config(DexScreenerConfig::from(&config.dexscreener))?;
        let credentials: Arc<dyn CredentialProvider> = config.defined.credentials();
        let defined = DefinedClient::with_config(DefinedConfig::from(&config.defined), credentials)?;

        Ok(Self::from_clients(dexscreener, defined))
    }

    /// Provider names in consultation order
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn lookup(&self, options: &TokenLookupOptions) -> TokenLookupResponse {
        let mut last_failure = None;

        for provider in &self.providers {
            let result = provider.fetch(options).await;
            if result.is_success() {
                tracing::debug!("{} resolved {}", provider.name(), options.address);
                return result;
            }

            tracing::warn!(
                "{} lookup failed for {}: {}",
                provider.name(),
                options.address,
                result.error().unwrap_or_default()
            );
            last_failure = Some(result);
        }

        last_failure.unwrap_or_else(|| TokenLookupResponse::failure(NO_PROVIDERS))
    }
}

impl std::fmt::Debug for TokenLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenLookup")
            .field("providers", &self.provider_names())
            .finish()
    }
}

fn default_clients() -> Result<&'static (DexScreenerClient, DefinedClient), String> {
    static CLIENTS: OnceLock<Result<(DexScreenerClient, DefinedClient), String>> = OnceLock::new();

    CLIENTS
        .get_or_init(|| {
            let config = Config::from_env();
            let dexscreener = DexScreenerClient::with_config(DexScreenerConfig::from(&config.dexscreener))
                .map_err(|e| e.to_string())?;
            let defined = DefinedClient::with_config(
                DefinedConfig::from(&config.defined),
                config.defined.credentials(),
            )
            .map_err(|e| e.to_string())?;
            Ok((dexscreener, defined))
        })
        .as_ref()
        .map_err(|e| e.clone())
}

/// Look up a token with the default chain (DexScreener, then Defined)
pub async fn get_token_info(options: &TokenLookupOptions) -> TokenLookupResponse {
    match default_clients() {
        Ok((dexscreener, defined)) => {
            TokenLookup::from_clients(dexscreener.clone(), defined.clone())
                .lookup(options)
                .await
        }
        Err(e) => TokenLookupResponse::failure(e),
    }
}

/// Look up a token on DexScreener only
pub async fn get_dexscreener_token_info(options: &TokenLookupOptions) -> TokenLookupResponse {
    match default_clients() {
        Ok((dexscreener, _)) => dexscreener.fetch(options).await,
        Err(e) => TokenLookupResponse::failure(e),
    }
}

/// Look up a token on Defined only
pub async fn get_defined_token_info(options: &TokenLookupOptions) -> TokenLookupResponse {
    match default_clients() {
        Ok((_, defined)) => defined.fetch(options).await,
        Err(e) => TokenLookupResponse::failure(e),
    }
}
