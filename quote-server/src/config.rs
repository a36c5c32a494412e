//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::advisory::AdvisoryConfig;
use crate::quote::QuoteConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors in environment configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Catalog loaded at startup; the server starts empty without one.
    pub catalog_path: Option<PathBuf>,
    pub quote: QuoteConfig,
    /// Advisory service; the static advisor is used without one.
    pub advisory: Option<AdvisoryConfig>,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    ///
    /// - `QUOTE_BIND_ADDR` (default `127.0.0.1:3000`)
    /// - `QUOTE_CATALOG_PATH`
    /// - `QUOTE_RUB_PER_USD` (default 95)
    /// - `ADVISORY_URL` and `ADVISORY_API_KEY`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("QUOTE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "QUOTE_BIND_ADDR",
                value: bind_addr.clone(),
                reason: e.to_string(),
            })?;

        let mut quote = QuoteConfig::default();
        if let Some(rate) = get("QUOTE_RUB_PER_USD") {
            quote.rub_per_usd = parse_rate(&rate)?;
        }

        let advisory = get("ADVISORY_URL").map(|url| {
            AdvisoryConfig::new(get("ADVISORY_API_KEY").unwrap_or_default()).with_base_url(url)
        });

        Ok(Self {
            bind_addr,
            catalog_path: get("QUOTE_CATALOG_PATH").map(PathBuf::from),
            quote,
            advisory,
        })
    }
}

fn parse_rate(value: &str) -> Result<f64, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        key: "QUOTE_RUB_PER_USD",
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let rate = value
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(&e.to_string()))?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(invalid("must be a positive number"));
    }
    Ok(rate)
}
