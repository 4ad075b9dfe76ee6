use std::sync::{Arc, Mutex};
use async_trait::async_trait;

use crate::domain::{TokenLookupOptions, TokenLookupResponse};
use super::token_info::TokenInfoPort;

/// Mock token info port that records calls and returns a fixed response
#[derive(Debug, Clone)]
pub struct MockTokenInfo {
    name: &'static str,
    calls: Arc<Mutex<Vec<TokenLookupOptions>>>,
    response: TokenLookupResponse,
}

impl MockTokenInfo {
    /// Mock that fails with "No response configured" until given a response
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            calls: Arc::new(Mutex::new(Vec::new())),
            response: TokenLookupResponse::failure("No response configured"),
        }
    }

    /// Builder method to set the response returned for every call
    pub fn with_response(mut self, response: TokenLookupResponse) -> Self {
        self.response = response;
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<TokenLookupOptions> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }
}

#[async_trait]
impl TokenInfoPort for MockTokenInfo {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, options: &TokenLookupOptions) -> TokenLookupResponse {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(options.clone());
        }
        self.response.clone()
    }
}
