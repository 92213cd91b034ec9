//! Backend client configuration

use std::time::Duration;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, ENV_API_TOKEN, ENV_API_URL, ENV_TIMEOUT_SECS,
    GROUPS_PATH,
};
use crate::error::{PermatrixError, Result};

/// Where and how to reach the HR backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without the `/User/groups` suffix
    pub base_url: String,
    /// Bearer token sent with every request
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig { base_url: base_url.into(), ..Default::default() }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `PERMATRIX_API_URL`, `PERMATRIX_API_TOKEN` and
    /// `PERMATRIX_TIMEOUT_SECS`, falling back to defaults for unset ones
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Same as `from_env` over an arbitrary variable source
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let mut cfg = ClientConfig::default();
        if let Some(url) = lookup(ENV_API_URL).filter(|s| !s.trim().is_empty()) {
            cfg.base_url = url;
        }
        cfg.token = lookup(ENV_API_TOKEN).filter(|s| !s.is_empty());
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                PermatrixError::Config(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got {secs:?}"))
            })?;
            cfg.timeout = Duration::from_secs(secs);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(PermatrixError::Config(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(PermatrixError::Config("timeout must be positive".into()));
        }
        Ok(())
    }

    /// URL of a path under the groups endpoint, e.g. `group_url("all")`
    pub fn group_url(&self, tail: &str) -> String {
        format!("{}{}/{}", self.base_url.trim_end_matches('/'), GROUPS_PATH, tail)
    }
}
