//! Configuration structures and defaults for the service.
//!
//! A [`ServiceConfig`] holds the defaults shared by every request issued
//! through a [`Service`](super::Service). It is normally assembled with the
//! [`ServiceBuilder`](super::ServiceBuilder).

use std::time::Duration;

/// Configuration structure for the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Prefix joined to every request URL. Empty means request URLs are absolute.
    pub base_uri: String,
    /// Request timeout; zero falls back to [`ServiceConfig::DEFAULT_TIMEOUT`].
    pub timeout: Duration,
    /// Keep connections alive. When off, every request carries `Connection: close`.
    pub keep_alive: bool,
    /// Upper bound for the per-request retry count.
    pub max_retries: u32,
}

impl ServiceConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Timeout to apply, never zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            Self::DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_uri: String::new(),
            timeout: Self::DEFAULT_TIMEOUT,
            keep_alive: false,
            max_retries: Self::DEFAULT_MAX_RETRIES,
        }
    }
}
