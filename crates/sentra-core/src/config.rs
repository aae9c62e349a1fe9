// ── Runtime feed configuration ──
//
// Describes *what* to poll and how often. Built by the CLI/consumer and
// handed in; this crate never touches disk.

use std::time::Duration;

use url::Url;

use sentra_api::transport::TlsMode;
use sentra_api::{Severity, MAX_DAYS, MAX_PAGE_LIMIT};

use crate::error::CoreError;

/// TLS verification strategy (core-level mirror of the api crate's `TlsMode`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). Default — the backend is typically plain
    /// HTTP on a trusted network, and HTTPS deployments have real certs.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

impl TlsVerification {
    pub(crate) fn to_tls_mode(&self) -> TlsMode {
        match self {
            Self::SystemDefaults => TlsMode::System,
            Self::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            Self::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Configuration for a single activity feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Backend base URL (e.g., `http://192.168.101.4:5000`).
    pub base_url: Url,
    /// Day range to query.
    pub days: u32,
    /// Records per table page.
    pub page_size: u32,
    /// Initial severity filter.
    pub status_filter: Option<Severity>,
    /// Initial source filter.
    pub source_filter: Option<String>,
    /// Whether to run the background refresh scheduler.
    pub auto_refresh: bool,
    /// Scheduler period.
    pub refresh_interval: Duration,
    /// Maximum age of a full-range cache entry.
    pub cache_ttl: Duration,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// TLS verification strategy.
    pub tls: TlsVerification,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000"
                .parse()
                .expect("default base URL is valid"),
            days: 7,
            page_size: 10,
            status_filter: None,
            source_filter: None,
            auto_refresh: true,
            refresh_interval: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(30),
            timeout: Duration::from_secs(10),
            tls: TlsVerification::default(),
        }
    }
}

impl FeedConfig {
    /// Validate against the backend's documented limits.
    ///
    /// The server clamps out-of-range values silently; rejecting them here
    /// keeps the client's pagination math honest.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.days == 0 || self.days > MAX_DAYS {
            return Err(CoreError::Config {
                message: format!("days must be between 1 and {MAX_DAYS}, got {}", self.days),
            });
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_LIMIT {
            return Err(CoreError::Config {
                message: format!(
                    "page_size must be between 1 and {MAX_PAGE_LIMIT}, got {}",
                    self.page_size
                ),
            });
        }
        if self.auto_refresh && self.refresh_interval.is_zero() {
            return Err(CoreError::Config {
                message: "refresh_interval must be non-zero when auto_refresh is enabled".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(FeedConfig::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_days_rejected() {
        let mut cfg = FeedConfig::default();
        cfg.days = 0;
        assert!(cfg.validate().is_err());
        cfg.days = 31;
        assert!(cfg.validate().is_err());
        cfg.days = 30;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn out_of_range_page_size_rejected() {
        let mut cfg = FeedConfig::default();
        cfg.page_size = 101;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_interval_only_matters_with_auto_refresh() {
        let mut cfg = FeedConfig::default();
        cfg.refresh_interval = Duration::ZERO;
        assert!(cfg.validate().is_err());
        cfg.auto_refresh = false;
        assert!(cfg.validate().is_ok());
    }
}
