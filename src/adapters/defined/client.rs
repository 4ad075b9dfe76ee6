//! Defined.fi API Client
//!
//! Authenticated token lookup against `/api/v0/tokens/{address}`. Second in
//! the fallback chain; needs an API key from a [`CredentialProvider`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{TokenData, TokenLookupOptions, TokenLookupResponse};
use crate::ports::{CredentialProvider, EnvCredentials, TokenInfoPort};
use super::types::DefinedToken;

pub const DEFINED_BASE_URL: &str = "https://api.defined.fi";

const API_KEY_HEADER: &str = "X-API-KEY";

#[derive(Debug, Error)]
pub enum DefinedError {
    #[error("Defined API key not found in environment variables")]
    MissingApiKey,

    #[error("Token not found on Defined")]
    TokenNotFound,

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse Defined response: {0}")]
    Parse(String),

    #[error("Invalid Defined URL: {0}")]
    InvalidUrl(String),
}

/// Defined client configuration
#[derive(Debug, Clone)]
pub struct DefinedConfig {
    /// Base URL, without trailing slash
    pub api_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for DefinedConfig {
    fn default() -> Self {
        Self {
            api_url: DEFINED_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl DefinedConfig {
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct DefinedClient {
    config: DefinedConfig,
    credentials: Arc<dyn CredentialProvider>,
    http: Client,
}

impl DefinedClient {
    /// Client using the default URL and `DEFINED_API_KEY` from the environment
    pub fn new() -> Result<Self, DefinedError> {
        Self::with_config(DefinedConfig::default(), Arc::new(EnvCredentials::default()))
    }

    pub fn with_credentials(credentials: Arc<dyn CredentialProvider>) -> Result<Self, DefinedError> {
        Self::with_config(DefinedConfig::default(), credentials)
    }

    pub fn with_config(
        config: DefinedConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, DefinedError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, credentials, http })
    }

    pub fn api_url(&self) -> &str {
        self.config.api_url.trim_end_matches('/')
    }

    /// Fetch and normalize a token record.
    ///
    /// Fails with [`DefinedError::MissingApiKey`] before any request when no
    /// key is configured.
    pub async fn get_token_data(&self, options: &TokenLookupOptions) -> Result<TokenData, DefinedError> {
        let api_key = self.credentials.api_key().ok_or(DefinedError::MissingApiKey)?;
        let url = self.token_url(&options.address)?;

        tracing::debug!("Defined token lookup: {}", url);

        let body = self.http
            .get(url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let token = token_record(&body)?.ok_or(DefinedError::TokenNotFound)?;
        Ok(token.to_token_data(options, Utc::now()))
    }

    /// `{api_url}/api/v0/tokens/{address}` with the address percent-encoded
    fn token_url(&self, address: &str) -> Result<Url, DefinedError> {
        let mut url = Url::parse(self.api_url()).map_err(|e| DefinedError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| DefinedError::InvalidUrl(self.api_url().to_string()))?
            .pop_if_empty()
            .extend(["api", "v0", "tokens", address]);
        Ok(url)
    }
}

/// The `data` object of a response body, `None` when absent or null
fn token_record(body: &str) -> Result<Option<DefinedToken>, DefinedError> {
    let data = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(mut envelope)) => match envelope.remove("data") {
            Some(Value::Null) | None => return Ok(None),
            Some(data) => data,
        },
        _ => return Ok(None),
    };

    serde_json::from_value(data)
        .map(Some)
        .map_err(|e| DefinedError::Parse(e.to_string()))
}

#[async_trait]
impl TokenInfoPort for DefinedClient {
    fn name(&self) -> &'static str {
        "defined"
    }

    async fn fetch(&self, options: &TokenLookupOptions) -> TokenLookupResponse {
        match self.get_token_data(options).await {
            Ok(data) => TokenLookupResponse::success(data),
            Err(e @ (DefinedError::MissingApiKey | DefinedError::TokenNotFound)) => {
                tracing::debug!("Defined lookup for {} failed: {}", options.address, e);
                TokenLookupResponse::failure(e.to_string())
            }
            Err(e) => {
                tracing::error!("Defined API error for {}: {}", options.address, e);
                TokenLookupResponse::failure(e.to_string())
            }
        }
    }
}
