//! HTTP client setup and middleware configuration.
//!
//! Every request gets a fresh client built from an [`HttpClientConfig`]. The
//! client always carries the tracing middleware; the retry middleware is only
//! added when the request asked for retries.
//!
//! # Examples
//!
//! ```rust
//! use restyle::http::{create_http_client, HttpClientConfig, RetrySettings};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig {
//!     timeout: Duration::from_secs(5),
//!     retry: Some(RetrySettings::new(2)),
//!     ..HttpClientConfig::default()
//! };
//!
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use super::{RedirectPolicy, RetrySettings, TlsMode};
use reqwest::{cookie::Jar, header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::{sync::Arc, time::Duration};

/// Configuration for HTTP client setup.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Total request timeout.
    pub timeout: Duration,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Retry settings, `None` disables retries.
    pub retry: Option<RetrySettings>,
    /// Redirect policies, `None` keeps the library default.
    pub redirect: Option<Vec<RedirectPolicy>>,
    /// Cookie jar shared with the caller.
    pub cookie_jar: Option<Arc<Jar>>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
    /// TLS verification mode or custom transport.
    pub tls: TlsMode,
}

impl HttpClientConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            proxy: None,
            retry: None,
            redirect: None,
            cookie_jar: None,
            headers: None,
            tls: TlsMode::default(),
        }
    }
}

/// Creates an HTTP client with middleware configuration.
///
/// This function sets up a reqwest client with:
/// - Tracing middleware for request/response logging
/// - Retry middleware with exponential backoff, if configured
/// - Optional proxy, redirect policies, cookie jar and default headers
/// - TLS settings or a custom transport
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder().timeout(config.timeout);

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    if let Some(policies) = config.redirect {
        inner_client_builder = inner_client_builder.redirect(RedirectPolicy::compose(policies));
    }

    if let Some(jar) = config.cookie_jar {
        inner_client_builder = inner_client_builder.cookie_provider(jar);
    }

    inner_client_builder = config.tls.apply(inner_client_builder);

    let inner_client = inner_client_builder.build()?;

    // Trace HTTP requests. See the tracing crate to make use of these traces.
    let mut builder = ClientBuilder::new(inner_client).with(TracingMiddleware::default());
    if let Some(retry) = &config.retry {
        builder = retry.install(builder);
    }

    Ok(builder.build())
}
