//! Configuration module for PathX
//!
//! Settings are read from the environment once, at startup, into typed
//! structs. The directions client receives its [`RouteConfig`] explicitly and
//! never reads process environment itself.

use std::env::VarError;
use std::fmt;
use std::time::Duration;
use tracing::info;

use super::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RATE_LIMIT_PER_MINUTE, DEFAULT_REQUEST_TIMEOUT_SECS,
    ENV_HOST, ENV_ORS_API_KEY, ENV_ORS_BASE_URL, ENV_ORS_TIMEOUT_SECS, ENV_PORT,
    ENV_PORT_FALLBACK, ENV_RATE_LIMIT, ENV_TRUST_PROXY, ORS_BASE_URL,
};

/// Bearer token for the directions provider.
/// Key is NEVER logged: `Debug` and `Display` are redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Settings for the directions client
#[derive(Clone)]
pub struct RouteConfig {
    /// Raw ORS_API_KEY value, checked on every call that needs it
    api_key: Option<String>,
    /// Provider base URL (no trailing path)
    pub base_url: String,
    /// Upper bound for one request round-trip
    pub timeout: Duration,
}

impl fmt::Debug for RouteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: ORS_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl RouteConfig {
    /// Config with an explicit key and production defaults
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name))
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let api_key = optional_var(&lookup, ENV_ORS_API_KEY)?;
        if api_key.is_some() {
            info!("🔑 {} configured (key hidden for security)", ENV_ORS_API_KEY);
        }

        let base_url = optional_var(&lookup, ENV_ORS_BASE_URL)?
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| ORS_BASE_URL.to_string());

        let timeout_secs = match optional_var(&lookup, ENV_ORS_TIMEOUT_SECS)? {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::invalid_config(format!(
                    "{} must be a whole number of seconds, got {:?}: {}",
                    ENV_ORS_TIMEOUT_SECS, raw, e
                ))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(AppError::invalid_config(format!(
                "{} must be greater than zero",
                ENV_ORS_TIMEOUT_SECS
            )));
        }

        Ok(Self {
            api_key,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Resolve the credential for a request.
    ///
    /// Fails with a configuration error when the key is absent, empty or
    /// whitespace-only.
    pub fn resolve_credential(&self) -> AppResult<Credential> {
        match self.api_key.as_deref() {
            None => Err(AppError::missing_api_key(ENV_ORS_API_KEY)),
            Some(key) if key.trim().is_empty() => Err(AppError::empty_api_key(ENV_ORS_API_KEY)),
            Some(key) => Ok(Credential(key.to_string())),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.resolve_credential().is_ok()
    }
}

/// Settings for the REST API server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per minute per client key
    pub rate_limit_per_minute: u32,
    /// Rate-limit on forwarded client addresses instead of the peer address
    pub trust_proxy: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
            trust_proxy: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name))
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = Self::default();

        let host = optional_var(&lookup, ENV_HOST)?.unwrap_or(defaults.host);

        // PaaS runtimes set PORT; PATHX_PORT is for local runs
        let port = match optional_var(&lookup, ENV_PORT)?
            .or(optional_var(&lookup, ENV_PORT_FALLBACK)?)
        {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                AppError::invalid_config(format!("invalid port {:?}: {}", raw, e))
            })?,
            None => defaults.port,
        };

        let rate_limit_per_minute = match optional_var(&lookup, ENV_RATE_LIMIT)? {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                AppError::invalid_config(format!("{} invalid {:?}: {}", ENV_RATE_LIMIT, raw, e))
            })?,
            None => defaults.rate_limit_per_minute,
        };

        let trust_proxy = match optional_var(&lookup, ENV_TRUST_PROXY)? {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "" | "0" | "false" | "no" => false,
                _ => {
                    return Err(AppError::invalid_config(format!(
                        "{} must be true or false, got {:?}",
                        ENV_TRUST_PROXY, raw
                    )))
                }
            },
            None => defaults.trust_proxy,
        };

        Ok(Self {
            host,
            port,
            rate_limit_per_minute,
            trust_proxy,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn optional_var<F>(lookup: &F, name: &str) -> AppResult<Option<String>>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(AppError::invalid_config(format!(
            "{} value is not valid unicode",
            name
        ))),
    }
}
