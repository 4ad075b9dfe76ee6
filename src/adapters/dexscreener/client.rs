//! DexScreener API Client
//!
//! HTTP client for the public DexScreener API. Provides the normalized
//! token lookup used by the fallback chain plus direct passthroughs for
//! profiles, boosts, orders and pair search.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{TokenData, TokenLookupOptions, TokenLookupResponse, DEFAULT_CHAIN_ID};
use crate::ports::TokenInfoPort;
use super::types::{DexScreenerPair, DexScreenerSearchResponse, TokenBoost, TokenOrder, TokenProfile};

pub const DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com";

#[derive(Debug, Error)]
pub enum DexScreenerError {
    #[error("Token not found on DexScreener")]
    TokenNotFound,

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse DexScreener response: {0}")]
    Parse(String),

    #[error("{0}")]
    InvalidParameters(String),
}

/// DexScreener client configuration
#[derive(Debug, Clone)]
pub struct DexScreenerConfig {
    /// Base URL, without trailing slash
    pub api_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            api_url: DEXSCREENER_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl DexScreenerConfig {
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    config: DexScreenerConfig,
    http: Client,
}

impl DexScreenerClient {
    pub fn new() -> Result<Self, DexScreenerError> {
        Self::with_config(DexScreenerConfig::default())
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self, DexScreenerError> {
        Self::with_config(DexScreenerConfig::with_api_url(api_url))
    }

    pub fn with_config(config: DexScreenerConfig) -> Result<Self, DexScreenerError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, http })
    }

    pub fn api_url(&self) -> &str {
        self.config.api_url.trim_end_matches('/')
    }

    /// Look up a token and normalize its first listed pair.
    ///
    /// Uses `/tokens/v1/{chainId}/{address}`; the chain defaults to
    /// `solana` when the options carry none.
    pub async fn get_token_data(&self, options: &TokenLookupOptions) -> Result<TokenData, DexScreenerError> {
        let chain = options
            .requested_chain()
            .map(|chain| chain.to_string())
            .unwrap_or_else(|| DEFAULT_CHAIN_ID.to_string());
        let url = self.endpoint_url(&["tokens", "v1", chain.as_str(), options.address.as_str()])?;

        tracing::debug!("DexScreener token lookup: {}", url);

        let body = self.http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let pair = first_pair(&body)?.ok_or(DexScreenerError::TokenNotFound)?;
        Ok(pair.to_token_data(Utc::now()))
    }

    /// Latest token profiles
    pub async fn get_token_profiles(&self) -> Result<Vec<TokenProfile>, DexScreenerError> {
        self.get_json(&["token-profiles", "latest", "v1"], &[]).await
    }

    /// Latest boosted tokens
    pub async fn get_latest_boosts(&self) -> Result<Vec<TokenBoost>, DexScreenerError> {
        self.get_json(&["token-boosts", "latest", "v1"], &[]).await
    }

    /// Tokens with the most active boosts
    pub async fn get_top_boosts(&self) -> Result<Vec<TokenBoost>, DexScreenerError> {
        self.get_json(&["token-boosts", "top", "v1"], &[]).await
    }

    /// Paid orders for a token
    pub async fn get_token_orders(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> Result<Vec<TokenOrder>, DexScreenerError> {
        self.get_json(&["orders", "v1", chain_id, token_address], &[]).await
    }

    /// Search pairs by address, symbol or name, optionally filtered by chain
    pub async fn search_pairs(
        &self,
        query: &str,
        chain_id: Option<&str>,
    ) -> Result<Vec<DexScreenerPair>, DexScreenerError> {
        let mut params = vec![("q", query)];
        if let Some(chain) = chain_id.filter(|c| !c.is_empty()) {
            params.push(("chain", chain));
        }

        let response: DexScreenerSearchResponse = self.get_json(&["latest", "dex", "search"], &params).await?;
        Ok(response.pairs)
    }

    /// Pairs for a token address on a specific chain
    pub async fn get_pairs(
        &self,
        token_address: &str,
        chain_id: &str,
    ) -> Result<Vec<DexScreenerPair>, DexScreenerError> {
        if chain_id.is_empty() {
            return Err(DexScreenerError::InvalidParameters(
                "chainId is required for getPairs".to_string(),
            ));
        }

        let response: DexScreenerSearchResponse = self
            .get_json(&["latest", "dex", "search"], &[("q", token_address), ("chain", chain_id)])
            .await?;
        Ok(response.pairs)
    }

    /// A single pair by address. Errors are logged and reported as `None`.
    pub async fn get_pair(&self, pair_address: &str, chain_id: &str) -> Option<DexScreenerPair> {
        let segments = ["latest", "dex", "pairs", chain_id, pair_address];

        match self.get_json::<DexScreenerSearchResponse>(&segments, &[]).await {
            Ok(response) => response.pairs.into_iter().next(),
            Err(e) => {
                tracing::error!("DexScreener getPair error for {}: {}", pair_address, e);
                None
            }
        }
    }

    /// Base URL plus path segments, each percent-encoded
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, DexScreenerError> {
        let mut url = Url::parse(self.api_url())
            .map_err(|e| DexScreenerError::InvalidParameters(format!("Invalid DexScreener URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| DexScreenerError::InvalidParameters(format!("Invalid DexScreener URL: {}", self.api_url())))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T>(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<T, DexScreenerError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(segments)?;
        tracing::debug!("DexScreener GET {}", url);

        let mut req = self.http.get(url);
        if !query.is_empty() {
            req = req.query(query);
        }

        let response = req.send().await?.error_for_status()?;
        response
            .json::<T>()
            .await
            .map_err(|e| DexScreenerError::Parse(e.to_string()))
    }
}

/// First pair of a `/tokens/v1` body.
///
/// Anything that is not a non-empty JSON array counts as "no pairs".
fn first_pair(body: &str) -> Result<Option<DexScreenerPair>, DexScreenerError> {
    let first = match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(mut pairs)) if !pairs.is_empty() => pairs.swap_remove(0),
        _ => return Ok(None),
    };

    serde_json::from_value(first)
        .map(Some)
        .map_err(|e| DexScreenerError::Parse(e.to_string()))
}

#[async_trait]
impl TokenInfoPort for DexScreenerClient {
    fn name(&self) -> &'static str {
        "dexscreener"
    }

    async fn fetch(&self, options: &TokenLookupOptions) -> TokenLookupResponse {
        match self.get_token_data(options).await {
            Ok(data) => TokenLookupResponse::success(data),
            Err(DexScreenerError::TokenNotFound) => {
                tracing::debug!("No DexScreener pairs for {}", options.address);
                TokenLookupResponse::failure(DexScreenerError::TokenNotFound.to_string())
            }
            Err(e) => {
                tracing::error!("DexScreener API error for {}: {}", options.address, e);
                TokenLookupResponse::failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChainId, TokenSource};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FARTCOIN: &str = "9BB6NFEcjBCtnNLFko2FqVQBq8HHM13kCyYcdQbgpump";

    fn pair_json(price_usd: &str) -> serde_json::Value {
        json!({
            "chainId": "solana",
            "dexId": "raydium",
            "url": "https://dexscreener.com/solana/pair",
            "pairAddress": "Bzc9NZfMqkXR6fz1DBph7BDf9BroyEf6pnzESP7v5iiw",
            "baseToken": { "address": FARTCOIN, "name": "Fartcoin ", "symbol": "Fartcoin " },
            "quoteToken": { "address": "So11111111111111111111111111111111111111112", "name": "Wrapped SOL", "symbol": "SOL" },
            "priceNative": "0.0045",
            "priceUsd": price_usd,
            "volume": { "h24": 1500000.0 },
            "priceChange": { "h24": 2.5 },
            "liquidity": { "usd": 300000.0, "base": 1.0, "quote": 2.0 },
            "fdv": 900000000.0,
            "marketCap": 850000000.0
        })
    }

    async fn client_for(server: &MockServer) -> DexScreenerClient {
        DexScreenerClient::with_api_url(server.uri()).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = DexScreenerConfig::default();
        assert_eq!(config.api_url, "https://api.dexscreener.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_api_url_trailing_slash() {
        let client = DexScreenerClient::with_api_url("http://localhost:9000/").unwrap();
        assert_eq!(client.api_url(), "http://localhost:9000");
    }

    #[test]
    fn test_endpoint_url_encodes_segments() {
        let client = DexScreenerClient::with_api_url("http://localhost:9000/").unwrap();

        let url = client.endpoint_url(&["tokens", "v1", "solana", "a/b?c#d"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/tokens/v1/solana/a%2Fb%3Fc%23d");

        assert!(DexScreenerClient::with_api_url("not a url").unwrap().endpoint_url(&["x"]).is_err());
    }

    #[tokio::test]
    async fn test_fetch_keeps_address_in_one_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens/v1/solana/evil%2F..%3Fq%23frag"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([pair_json("1.0")])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.fetch(&TokenLookupOptions::new("evil/..?q#frag")).await;
        assert!(result.is_success());
    }

    #[test]
    fn test_first_pair_not_found_shapes() {
        assert!(first_pair("").unwrap().is_none());
        assert!(first_pair("[]").unwrap().is_none());
        assert!(first_pair("{\"pairs\":[]}").unwrap().is_none());
        assert!(first_pair("null").unwrap().is_none());
        assert!(first_pair("<html>").unwrap().is_none());
    }

    #[test]
    fn test_first_pair_takes_first_element() {
        let mut second = pair_json("2.0");
        second["baseToken"]["symbol"] = json!("SECOND");
        let body = json!([pair_json("1.0"), second]).to_string();

        let pair = first_pair(&body).unwrap().unwrap();
        assert_eq!(pair.base_token.symbol, "Fartcoin ");
    }

    #[test]
    fn test_first_pair_malformed_element() {
        let result = first_pair("[{\"chainId\": \"solana\"}]");
        assert!(matches!(result, Err(DexScreenerError::Parse(_))));
    }

    #[tokio::test]
    async fn test_fetch_success_defaults_to_solana() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/tokens/v1/solana/{}", FARTCOIN)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([pair_json("0.98")])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.fetch(&TokenLookupOptions::new(FARTCOIN)).await;

        assert!(result.is_success());
        let data = result.data().unwrap();
        assert_eq!(data.source, TokenSource::DexScreener);
        assert_eq!(data.chain_id, ChainId::from("solana"));
        assert_eq!(data.price.usd, 0.98);
        assert_eq!(data.volume_24h, Some(1500000.0));
        assert_eq!(data.market_cap, Some(850000000.0));
    }

    #[tokio::test]
    async fn test_fetch_uses_requested_chain() {
        let server = MockServer::start().await;
        let mut pair = pair_json("3.1");
        pair["chainId"] = json!("base");
        pair["baseToken"]["address"] = json!("0xBaseTokenAddress");
        Mock::given(method("GET"))
            .and(path("/tokens/v1/base/0xrequested"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([pair])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let options = TokenLookupOptions::new("0xrequested").with_chain("base");
        let data = client.fetch(&options).await.into_result().unwrap();

        // Identity comes from the pair, not the request
        assert_eq!(data.address, "0xBaseTokenAddress");
        assert_eq!(data.chain_id, ChainId::from("base"));
    }

    #[tokio::test]
    async fn test_fetch_empty_array_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.fetch(&TokenLookupOptions::new("missing")).await;

        assert!(!result.is_success());
        assert_eq!(result.error(), Some("Token not found on DexScreener"));
    }

    #[tokio::test]
    async fn test_fetch_non_array_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "schemaVersion": "1.0.0", "pairs": null })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.fetch(&TokenLookupOptions::new("missing")).await;

        assert_eq!(result.error(), Some("Token not found on DexScreener"));
    }

    #[tokio::test]
    async fn test_fetch_non_numeric_price_is_zero() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([pair_json("n/a")])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let data = client.fetch(&TokenLookupOptions::new(FARTCOIN)).await.into_result().unwrap();

        assert_eq!(data.price.usd, 0.0);
    }

    #[tokio::test]
    async fn test_fetch_http_error_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.fetch(&TokenLookupOptions::new(FARTCOIN)).await;

        assert!(!result.is_success());
        let error = result.error().unwrap();
        assert!(error.contains("500"), "unexpected error: {}", error);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_failure() {
        let client = DexScreenerClient::with_api_url("http://127.0.0.1:9").unwrap();
        let result = client.fetch(&TokenLookupOptions::new(FARTCOIN)).await;

        assert!(!result.is_success());
        assert!(!result.error().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_pairs_with_chain() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest/dex/search"))
            .and(query_param("q", "SOL"))
            .and(query_param("chain", "solana"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "schemaVersion": "1.0.0",
                "pairs": [pair_json("150.0")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let pairs = client.search_pairs("SOL", Some("solana")).await.unwrap();

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].price_usd.as_deref(), Some("150.0"));
    }

    #[tokio::test]
    async fn test_get_pairs_requires_chain() {
        let client = DexScreenerClient::with_api_url("http://127.0.0.1:9").unwrap();
        let result = client.get_pairs(FARTCOIN, "").await;

        match result {
            Err(DexScreenerError::InvalidParameters(msg)) => {
                assert_eq!(msg, "chainId is required for getPairs")
            }
            other => panic!("expected InvalidParameters, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_pair_returns_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest/dex/pairs/solana/PairAddr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "schemaVersion": "1.0.0",
                "pairs": [pair_json("0.5")]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let pair = client.get_pair("PairAddr", "solana").await.unwrap();
        assert_eq!(pair.dex_id, "raydium");
    }

    #[tokio::test]
    async fn test_get_pair_error_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.get_pair("PairAddr", "solana").await.is_none());
    }

    #[tokio::test]
    async fn test_passthrough_errors_propagate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(matches!(client.get_token_profiles().await, Err(DexScreenerError::Http(_))));
        assert!(matches!(client.get_top_boosts().await, Err(DexScreenerError::Http(_))));
    }

    #[tokio::test]
    async fn test_token_orders_passthrough() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/orders/v1/solana/{}", FARTCOIN)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "type": "tokenProfile", "status": "approved", "paymentTimestamp": 1730000000000_i64 }
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let orders = client.get_token_orders("solana", FARTCOIN).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status, "approved");
    }

    #[tokio::test]
    async fn test_latest_boosts_passthrough() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/token-boosts/latest/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "url": "https://dexscreener.com/solana/abc",
                "chainId": "solana",
                "tokenAddress": "abc",
                "amount": 10,
                "totalAmount": 10
            }])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let boosts = client.get_latest_boosts().await.unwrap();
        assert_eq!(boosts[0].token_address, "abc");
    }
}
