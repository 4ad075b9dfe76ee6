//! Normalized token types
//!
//! The provider-independent shapes every adapter converts into:
//! lookup input, normalized token data, and the success/failure envelope.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chain used by DexScreener lookups when the caller does not name one
pub const DEFAULT_CHAIN_ID: &str = "solana";

/// Message used when a failure carries no text of its own
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Chain identifier as reported by an upstream API.
///
/// DexScreener uses names ("solana", "ethereum"), Defined uses numeric
/// network ids. Both are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChainId {
    Numeric(i64),
    Name(String),
}

impl ChainId {
    /// Empty names and `0` count as "not provided"
    pub fn is_empty(&self) -> bool {
        match self {
            ChainId::Numeric(id) => *id == 0,
            ChainId::Name(name) => name.is_empty(),
        }
    }

    /// Parse CLI/user input: integers become numeric ids, everything else a name
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<i64>() {
            Ok(id) => ChainId::Numeric(id),
            Err(_) => ChainId::Name(input.trim().to_string()),
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainId::Numeric(id) => write!(f, "{}", id),
            ChainId::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for ChainId {
    fn from(name: &str) -> Self {
        ChainId::Name(name.to_string())
    }
}

impl From<String> for ChainId {
    fn from(name: String) -> Self {
        ChainId::Name(name)
    }
}

impl From<i64> for ChainId {
    fn from(id: i64) -> Self {
        ChainId::Numeric(id)
    }
}

/// Which upstream produced a [`TokenData`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSource {
    DexScreener,
    Defined,
}

impl TokenSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenSource::DexScreener => "dexscreener",
            TokenSource::Defined => "defined",
        }
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenLookupOptions {
    /// Token address, in whatever form the upstream expects
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<ChainId>,
}

impl TokenLookupOptions {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            chain_id: None,
        }
    }

    pub fn with_chain(mut self, chain_id: impl Into<ChainId>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }

    /// The requested chain, if one was given and is non-empty
    pub fn requested_chain(&self) -> Option<&ChainId> {
        self.chain_id.as_ref().filter(|chain| !chain.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPrice {
    pub usd: f64,
    #[serde(rename = "change24h", default, skip_serializing_if = "Option::is_none")]
    pub change_24h: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liquidity {
    pub usd: f64,
}

/// Normalized token market data.
///
/// Optional fields stay `None` unless the upstream supplied them and are
/// omitted from serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    pub symbol: String,
    pub name: String,
    pub address: String,
    pub chain_id: ChainId,
    pub decimals: u8,
    pub price: TokenPrice,
    #[serde(rename = "volume24h", default, skip_serializing_if = "Option::is_none")]
    pub volume_24h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<Liquidity>,
    pub last_updated: DateTime<Utc>,
    pub source: TokenSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fdv: Option<f64>,
}

/// Result of a lookup: either data or an error message, never both.
///
/// Fields are private so the only way to build one is through
/// [`TokenLookupResponse::success`] or [`TokenLookupResponse::failure`].
/// Deserializing goes through the same constructors, so JSON that mixes
/// data with an error is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResponseWire")]
pub struct TokenLookupResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<TokenData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl TokenLookupResponse {
    pub fn success(data: TokenData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failure with a human-readable message; an empty message is replaced
    /// with [`UNKNOWN_ERROR`]
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        };

        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&TokenData> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn into_result(self) -> Result<TokenData, String> {
        match (self.data, self.error) {
            (Some(data), _) if self.success => Ok(data),
            (_, error) => Err(error.unwrap_or_else(|| UNKNOWN_ERROR.to_string())),
        }
    }
}

#[derive(Deserialize)]
struct ResponseWire {
    success: bool,
    #[serde(default)]
    data: Option<TokenData>,
    #[serde(default)]
    error: Option<String>,
}

impl TryFrom<ResponseWire> for TokenLookupResponse {
    type Error = String;

    fn try_from(wire: ResponseWire) -> Result<Self, Self::Error> {
        match (wire.success, wire.data, wire.error) {
            (true, Some(data), None) => Ok(Self::success(data)),
            (false, None, error) => Ok(Self::failure(error.unwrap_or_default())),
            (_, Some(_), Some(_)) => Err("response carries both data and an error".to_string()),
            (true, None, _) => Err("successful response without data".to_string()),
            (false, Some(_), None) => Err("failed response carries data".to_string()),
        }
    }
}
