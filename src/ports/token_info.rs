use async_trait::async_trait;

use crate::domain::{TokenLookupOptions, TokenLookupResponse};

/// A source of normalized token data.
///
/// Implementations never fail with `Err`: not-found, missing credentials
/// and transport errors all come back as a failure response.
#[async_trait]
pub trait TokenInfoPort: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    /// Fetch and normalize data for a single token
    async fn fetch(&self, options: &TokenLookupOptions) -> TokenLookupResponse;
}
