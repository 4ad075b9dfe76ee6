//! DexScreener Wire Types
//!
//! Response shapes for the DexScreener public API. Only `baseToken` is
//! required on a pair; everything else is optional because upstream omits
//! keys freely (new pairs often lack liquidity or market cap).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ChainId, Liquidity, TokenData, TokenPrice, TokenSource};

/// Token side of a pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairToken {
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub symbol: String,
}

/// Buy/sell counts for one timeframe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TxnCounts {
    #[serde(default)]
    pub buys: u64,
    #[serde(default)]
    pub sells: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairLiquidity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairBoosts {
    pub active: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairWebsite {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSocial {
    #[serde(default, alias = "type", deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(default, alias = "url", deserialize_with = "null_as_default")]
    pub handle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub websites: Vec<PairWebsite>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub socials: Vec<PairSocial>,
}

/// A trading pair as returned by `/tokens/v1`, `/latest/dex/search`
/// and `/latest/dex/pairs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexScreenerPair {
    #[serde(default, deserialize_with = "null_as_default")]
    pub chain_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dex_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pair_address: String,
    pub base_token: PairToken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<PairToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_native: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txns: Option<HashMap<String, TxnCounts>>,
    /// Keyed by timeframe: `m5`, `h1`, `h6`, `h24`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<HashMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change: Option<HashMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<PairLiquidity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fdv: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    /// Unix timestamp in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair_created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boosts: Option<PairBoosts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<PairInfo>,
}

impl DexScreenerPair {
    /// USD price, 0 when missing or not a finite number
    pub fn price_usd_value(&self) -> f64 {
        parse_price_usd(self.price_usd.as_deref())
    }

    pub fn volume_24h(&self) -> Option<f64> {
        self.volume.as_ref().and_then(|v| v.get("h24").copied())
    }

    pub fn price_change_24h(&self) -> Option<f64> {
        self.price_change.as_ref().and_then(|c| c.get("h24").copied())
    }

    pub fn liquidity_usd(&self) -> Option<f64> {
        self.liquidity.as_ref().and_then(|l| l.usd)
    }

    /// Normalize into [`TokenData`].
    ///
    /// Identity fields come from the pair's base token and reported chain,
    /// not from the lookup request. Volume and liquidity default to 0;
    /// decimals are always 0 since this API does not report them.
    pub fn to_token_data(&self, now: DateTime<Utc>) -> TokenData {
        TokenData {
            symbol: self.base_token.symbol.clone(),
            name: self.base_token.name.clone(),
            address: self.base_token.address.clone(),
            chain_id: ChainId::Name(self.chain_id.clone()),
            decimals: 0,
            price: TokenPrice {
                usd: self.price_usd_value(),
                change_24h: self.price_change_24h(),
            },
            volume_24h: Some(self.volume_24h().unwrap_or(0.0)),
            liquidity: Some(Liquidity {
                usd: self.liquidity_usd().unwrap_or(0.0),
            }),
            last_updated: now,
            source: TokenSource::DexScreener,
            market_cap: self.market_cap,
            fdv: self.fdv,
        }
    }
}

/// Parse DexScreener's string-encoded USD price
pub fn parse_price_usd(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|price| price.is_finite())
        .unwrap_or(0.0)
}

/// Envelope for `/latest/dex/search` and `/latest/dex/pairs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexScreenerSearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub schema_version: String,
    /// Upstream sends `null` when nothing matches
    #[serde(default, deserialize_with = "null_as_default")]
    pub pairs: Vec<DexScreenerPair>,
}

/// Upstream writes `null` where it means "empty"; treat it like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenLink {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub url: String,
}

/// Entry from `/token-profiles/latest/v1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenProfile {
    pub url: String,
    pub chain_id: String,
    pub token_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub header: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<TokenLink>>,
}

/// Entry from `/token-boosts/latest/v1` and `/token-boosts/top/v1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBoost {
    pub url: String,
    pub chain_id: String,
    pub token_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<TokenLink>,
}

/// Entry from `/orders/v1/{chainId}/{tokenAddress}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenOrder {
    pub payment_timestamp: i64,
    #[serde(rename = "type")]
    pub order_type: String,
    pub status: String,
}
