use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{DashboardError, Result};

pub const DEFAULT_API_BASE: &str = "https://api-shipra-v3.pilleo.ca";
pub const DEFAULT_SYMBOL: &str = "AAPL";
pub const ENDPOINT_PREFIX: &str = "/admin/ticker/unauth";

pub const ENV_API_BASE: &str = "TICKER_API_BASE";
pub const ENV_SYMBOL: &str = "TICKER_SYMBOL";
pub const ENV_TIMEOUT_SECS: &str = "TICKER_TIMEOUT_SECS";

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

/// The read-only analytics endpoints, all served under [`ENDPOINT_PREFIX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Info,
    ClosingPrices,
    TradingHighLow,
    MovingAverage,
    Performance,
    Peaks,
    Overview,
}

impl Endpoint {
    /// Last path segment, e.g. `"closing-prices"`.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Info => "info",
            Endpoint::ClosingPrices => "closing-prices",
            Endpoint::TradingHighLow => "trading-high-low",
            Endpoint::MovingAverage => "moving-average",
            Endpoint::Performance => "performance",
            Endpoint::Peaks => "peaks",
            Endpoint::Overview => "overview",
        }
    }

    /// Full request path, e.g. `"/admin/ticker/unauth/peaks"`.
    pub fn path(&self) -> String {
        format!("{}/{}", ENDPOINT_PREFIX, self.name())
    }

    pub fn all() -> &'static [Endpoint] {
        &[
            Endpoint::Info,
            Endpoint::ClosingPrices,
            Endpoint::TradingHighLow,
            Endpoint::MovingAverage,
            Endpoint::Performance,
            Endpoint::Peaks,
            Endpoint::Overview,
        ]
    }
}

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Connection settings injected into the dashboard at construction.
///
/// Layers, lowest precedence first: built-in defaults, a JSON config file,
/// `TICKER_*` environment variables, and finally explicit builder calls.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Scheme and host of the analytics API, without a trailing slash.
    pub base_url: String,
    /// Instrument symbol sent as the `symbol` query parameter.
    pub symbol: String,
    /// Per-request timeout. `None` means requests never time out.
    pub timeout: Option<Duration>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            timeout: None,
        }
    }
}

/// On-disk shape of `config.json`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    symbol: Option<String>,
    timeout_secs: Option<u64>,
}

impl DashboardConfig {
    /// Defaults, then the default config file (if present), then the environment.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = default_config_path() {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                config = config.merge_file(&path)?;
            }
        }
        config.apply_env()
    }

    /// Defaults overlaid with the given JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::default().merge_file(path)
    }

    /// Overlay the keys present in a JSON config file.
    pub fn merge_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let file: ConfigFile = serde_json::from_str(&contents).map_err(|e| {
            DashboardError::Config(format!("{}: {}", path.display(), e))
        })?;
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(symbol) = file.symbol {
            self.symbol = symbol;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Some(Duration::from_secs(secs));
        }
        Ok(self)
    }

    /// Overlay `TICKER_API_BASE`, `TICKER_SYMBOL` and `TICKER_TIMEOUT_SECS`.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay variables resolved through `lookup` (keys are the `ENV_*` names).
    pub fn apply_lookup<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_API_BASE) {
            self.base_url = base_url;
        }
        if let Some(symbol) = lookup(ENV_SYMBOL) {
            self.symbol = symbol;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                DashboardError::Config(format!("{ENV_TIMEOUT_SECS} is not a whole number: {raw:?}"))
            })?;
            self.timeout = Some(Duration::from_secs(secs));
        }
        Ok(self)
    }

    /// Normalize and check the settings.
    ///
    /// The symbol is trimmed and upper-cased; the base URL must be http(s)
    /// and loses any trailing slash.
    pub fn validate(mut self) -> Result<Self> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(DashboardError::InvalidArgument(
                "symbol must not be empty".into(),
            ));
        }
        self.symbol = symbol;

        let base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DashboardError::InvalidArgument(format!(
                "base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        self.base_url = base_url;
        Ok(self)
    }

    /// Absolute URL of an endpoint, without the query string.
    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

/// `<config dir>/ticker-dashboard/config.json`, e.g. `~/.config/...` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ticker-dashboard").join("config.json"))
}
