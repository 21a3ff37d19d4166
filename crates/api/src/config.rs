//! Process configuration, read from the environment.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use kart_observability::LogFormat;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_KEY: &str = "apitest";
pub const DEFAULT_PROMO_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_COUPON_FILES: [(&str, &str); 3] = [
    ("COUPON_FILE1", "couponbase1.txt"),
    ("COUPON_FILE2", "couponbase2.txt"),
    ("COUPON_FILE3", "couponbase3.txt"),
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid value for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    /// Value the `api_key` header must carry on protected routes.
    pub api_key: String,
    /// Coupon files consulted by the quorum validator, in order.
    pub coupon_files: Vec<PathBuf>,
    /// Upper bound on one promo validation; `None` waits indefinitely.
    pub promo_timeout: Option<Duration>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: DEFAULT_API_KEY.to_string(),
            coupon_files: DEFAULT_COUPON_FILES
                .iter()
                .map(|&(_, file)| PathBuf::from(file))
                .collect(),
            promo_timeout: Some(DEFAULT_PROMO_TIMEOUT),
            log_format: LogFormat::Json,
        }
    }
}

impl AppConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` for each variable. Unset and empty values both
    /// fall back to the default.
    ///
    /// - `PORT`, `API_KEY`
    /// - `COUPON_FILES` (comma-separated) or `COUPON_FILE1`..`COUPON_FILE3`
    /// - `PROMO_TIMEOUT_MS` (`0` disables the deadline)
    /// - `LOG_FORMAT` (`json` or `pretty`)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(port) = get("PORT") {
            config.port = port.trim().parse().map_err(|e| ConfigError {
                key: "PORT",
                reason: format!("{e}"),
            })?;
        }

        if let Some(api_key) = get("API_KEY") {
            config.api_key = api_key;
        }

        config.coupon_files = match get("COUPON_FILES") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect(),
            None => DEFAULT_COUPON_FILES
                .iter()
                .map(|&(key, default)| {
                    PathBuf::from(get(key).unwrap_or_else(|| default.to_string()))
                })
                .collect(),
        };

        if let Some(ms) = get("PROMO_TIMEOUT_MS") {
            let ms: u64 = ms.trim().parse().map_err(|e| ConfigError {
                key: "PROMO_TIMEOUT_MS",
                reason: format!("{e}"),
            })?;
            config.promo_timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }

        if let Some(format) = get("LOG_FORMAT") {
            config.log_format = format.parse().map_err(|reason| ConfigError {
                key: "LOG_FORMAT",
                reason,
            })?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
