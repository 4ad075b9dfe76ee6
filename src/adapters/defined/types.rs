//! Defined.fi Wire Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::{
    ChainId, Liquidity, TokenData, TokenLookupOptions, TokenPrice, TokenSource,
};

/// Token record from `/api/v0/tokens/{address}` (the `data` object)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinedToken {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub chain_id: Option<ChainId>,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub price_usd: Option<f64>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub price_change_24h: Option<f64>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub volume_24h: Option<f64>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub liquidity_usd: Option<f64>,
}

/// Numeric fields sometimes arrive as strings. Anything that is not a
/// finite number becomes `None` instead of failing the record.
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

impl DefinedToken {
    /// Normalize into [`TokenData`].
    ///
    /// The address is always the one that was requested, whatever the
    /// record reports. Market cap and FDV are never set.
    pub fn to_token_data(&self, options: &TokenLookupOptions, now: DateTime<Utc>) -> TokenData {
        let chain_id = self
            .chain_id
            .clone()
            .or_else(|| options.requested_chain().cloned())
            .unwrap_or_else(|| ChainId::Name(String::new()));

        TokenData {
            symbol: self.symbol.clone().unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            address: options.address.clone(),
            chain_id,
            decimals: self.decimals.unwrap_or(0),
            price: TokenPrice {
                usd: self.price_usd.unwrap_or(0.0),
                change_24h: self.price_change_24h,
            },
            volume_24h: self.volume_24h,
            liquidity: self.liquidity_usd.map(|usd| Liquidity { usd }),
            last_updated: now,
            source: TokenSource::Defined,
            market_cap: None,
            fdv: None,
        }
    }
}
