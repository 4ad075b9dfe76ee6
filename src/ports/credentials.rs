//! API credential lookup
//!
//! The Defined adapter asks a `CredentialProvider` for its key on every call,
//! so a key added to the environment later is picked up without rebuilding
//! the client.

/// Environment variable holding the Defined.fi API key
pub const DEFINED_API_KEY_ENV: &str = "DEFINED_API_KEY";

pub trait CredentialProvider: Send + Sync + std::fmt::Debug {
    /// Current API key, `None` when unset or empty
    fn api_key(&self) -> Option<String>;
}

/// Reads the key from an environment variable at call time
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var_name(&self) -> &str {
        &self.var
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(DEFINED_API_KEY_ENV)
    }
}

impl CredentialProvider for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|key| !key.trim().is_empty())
    }
}

/// Fixed key, set at construction (config files, tests)
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    key: Option<String>,
}

impl StaticCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    pub fn none() -> Self {
        Self { key: None }
    }
}

impl CredentialProvider for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.key.clone().filter(|key| !key.trim().is_empty())
    }
}
