//! Builder pattern implementation for creating Service instances.
//!
//! # Examples
//!
//! ```rust
//! use restyle::ServiceBuilder;
//! use std::time::Duration;
//!
//! let service = ServiceBuilder::new()
//!     .base_uri("https://api.example.com/v1/")
//!     .timeout(Duration::from_secs(10))
//!     .keep_alive(true)
//!     .max_retries(5)
//!     .build();
//!
//! assert_eq!(service.max_retries(), 5);
//! ```

use super::{config::ServiceConfig, service::Service};
use std::time::Duration;

/// A builder used to create a [`Service`].
#[derive(Debug, Default)]
pub struct ServiceBuilder {
    config: ServiceConfig,
}

impl ServiceBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        ServiceBuilder::default()
    }

    /// Set the prefix joined to every request URL.
    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.config.base_uri = base_uri.into();
        self
    }

    /// Set the request timeout. Zero restores the default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Keep connections alive instead of closing them after each request.
    pub fn keep_alive(mut self, keep_alive: bool) -> Self {
        self.config.keep_alive = keep_alive;
        self
    }

    /// Set the upper bound for per-request retries.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Create the [`Service`] with the specified options.
    pub fn build(mut self) -> Service {
        self.config.timeout = self.config.effective_timeout();
        Service::new(self.config)
    }
}
