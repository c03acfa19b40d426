//! Core service implementation: options translation and dispatch.
//!
//! # Examples
//!
//! ```rust,no_run
//! use restyle::{RequestOptions, ServiceBuilder};
//! use serde_json::json;
//!
//! # async fn example() {
//! let service = ServiceBuilder::new().base_uri("http://localhost:1338/v1").build();
//!
//! let reply = service
//!     .send("post", "data", RequestOptions::new().json(json!({"id": "1234"})).retry(2))
//!     .await;
//! println!("{} {}", reply.status_code(), reply.text());
//! # }
//! ```

use super::config::ServiceConfig;
use crate::http::{create_http_client, HttpClientConfig, TlsMode};
use crate::options::{stringify, RequestOptions};
use crate::utils::join_url;
use crate::{Error, Method, Reply, Result};

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONNECTION, CONTENT_TYPE, COOKIE},
    multipart::{Form, Part},
    Proxy, StatusCode, Url,
};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use tracing::{debug, warn};

/// Issues requests described by [`RequestOptions`].
///
/// A service is created via its builder:
///
/// ```rust
/// use restyle::ServiceBuilder;
///
/// let service = ServiceBuilder::new().build();
/// ```
///
/// It holds no connection state: every request gets a fresh client, so a single
/// service can be shared freely between tasks.
#[derive(Debug, Clone, Default)]
pub struct Service {
    config: ServiceConfig,
}

/// A translated request, ready to be dispatched.
pub struct Prepared {
    /// Parsed method.
    pub method: Method,
    /// URL after joining with the base URI.
    pub url: String,
    /// Headers installed on the client.
    pub headers: HeaderMap,
    /// Retry count after clamping; `0` means no retry middleware.
    pub retries: u32,
    client: ClientWithMiddleware,
}

impl fmt::Debug for Prepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prepared")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("retries", &self.retries)
            .finish()
    }
}

impl Prepared {
    /// The configured client.
    pub fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }
}

impl Service {
    /// Creates a new Service with the given configuration.
    pub(crate) fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Gets the base URI.
    pub fn base_uri(&self) -> &str {
        &self.config.base_uri
    }

    /// Gets the effective request timeout.
    pub fn timeout(&self) -> std::time::Duration {
        self.config.effective_timeout()
    }

    /// Gets whether connections are kept alive.
    pub fn keep_alive(&self) -> bool {
        self.config.keep_alive
    }

    /// Gets the upper bound for per-request retries.
    pub fn max_retries(&self) -> u32 {
        self.config.max_retries
    }

    /// A bare client carrying only the service timeout and tracing, for
    /// callers who want the library surface directly.
    pub fn client(&self) -> Result<ClientWithMiddleware> {
        let config = HttpClientConfig {
            timeout: self.timeout(),
            ..HttpClientConfig::default()
        };
        Ok(create_http_client(config)?)
    }

    /// Resolve a request URL against the base URI.
    pub fn resolve_url(&self, url: &str) -> String {
        join_url(&self.config.base_uri, url)
    }

    /// Headers sent with every request made for `options`.
    ///
    /// Explicit cookies go into the `Cookie` header unless a cookie jar is set,
    /// in which case [`Service::prepare`] stores them in the jar instead.
    pub fn request_headers(&self, options: &RequestOptions) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if !self.config.keep_alive {
            headers.insert(CONNECTION, HeaderValue::from_static("close"));
        }

        if options.cookie_jar.is_none() && !options.cookies.is_empty() {
            let cookies = options
                .cookies
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            headers.insert(COOKIE, header_value(COOKIE.as_str(), &cookies)?);
        }

        for (name, value) in stringify(&options.headers).unwrap_or_default() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value(&name, &value)?);
        }

        Ok(headers)
    }

    /// Translate `options` into a configured client, without any I/O.
    pub fn prepare(&self, options: &RequestOptions) -> Result<Prepared> {
        if options.method.is_empty() || options.url.is_empty() {
            return Err(Error::EmptyMethodOrUrl);
        }
        let method: Method = options.method.parse()?;
        if method.takes_body() && !options.data.is_empty() && options.json.is_some() {
            return Err(Error::ConflictingBody);
        }

        let url = self.resolve_url(&options.url);
        debug!("Resolved {} {}", method, url);

        let headers = self.request_headers(options)?;

        let proxy = options.proxy.as_deref().map(Proxy::all).transpose()?;

        let mut retry = options.retry_settings(self.config.max_retries);
        if let Some(settings) = &retry {
            if settings.retries < options.retry_count {
                debug!(
                    "Clamped retry count from {} to {}",
                    options.retry_count, settings.retries
                );
            }
        }
        if method == Method::File && retry.is_some() {
            // Multipart bodies are streamed and cannot be replayed.
            warn!("Retries are not applied to file uploads");
            retry = None;
        }
        let retries = retry.as_ref().map_or(0, |r| r.retries);

        if let Some(jar) = &options.cookie_jar {
            if let Ok(target) = Url::parse(&url) {
                for cookie in &options.cookies {
                    jar.add_cookie_str(&cookie.to_string(), &target);
                }
            }
        }

        let config = HttpClientConfig {
            timeout: self.timeout(),
            proxy,
            retry,
            redirect: options.redirect_settings(),
            cookie_jar: options.cookie_jar.clone(),
            headers: Some(headers.clone()),
            tls: TlsMode::resolve(options.insecure_skip_verify, options.transport.clone()),
        };
        let client = create_http_client(config)?;

        Ok(Prepared {
            method,
            url,
            headers,
            retries,
            client,
        })
    }

    /// Perform the request described by `options`.
    ///
    /// Never fails: errors are reported through [`Reply::error`].
    pub async fn execute(&self, options: RequestOptions) -> Reply {
        let prepared = match self.prepare(&options) {
            Ok(p) => p,
            Err(e @ Error::UnsupportedMethod(_)) => {
                return Reply::fail(e).with_status(StatusCode::SERVICE_UNAVAILABLE);
            }
            Err(e) => return Reply::fail(e),
        };

        self.dispatch(prepared, &options).await
    }

    /// Perform a request with the given method name and URL.
    ///
    /// The method and URL override the ones set on `options`.
    pub async fn send(&self, method: &str, url: &str, options: RequestOptions) -> Reply {
        let options = RequestOptions {
            method: method.to_string(),
            url: url.to_string(),
            ..options
        };
        self.execute(options).await
    }

    /// Blocking version of [`Service::send`].
    ///
    /// Runs the request on a private current-thread runtime, so it must not be
    /// called from within an async context.
    pub fn send_blocking(&self, method: &str, url: &str, options: RequestOptions) -> Reply {
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.send(method, url, options)),
            Err(source) => Reply::fail(Error::Runtime { source }),
        }
    }

    /// Attach the method specific parts and send.
    async fn dispatch(&self, prepared: Prepared, options: &RequestOptions) -> Reply {
        let Prepared {
            method,
            url,
            client,
            ..
        } = prepared;

        let mut req = client.request(method.http(), url.as_str());

        if options.basic_auth.is_complete() {
            req = req.basic_auth(
                &options.basic_auth.username,
                Some(&options.basic_auth.password),
            );
        }

        match method {
            Method::Get | Method::Delete | Method::Head => {
                if let Some(query) = stringify(&options.params) {
                    req = req.query(&query);
                }
            }
            Method::Post | Method::Put | Method::Patch => {
                if let Some(form) = stringify(&options.data) {
                    let encoded = form_urlencoded::Serializer::new(String::new())
                        .extend_pairs(form.iter())
                        .finish();
                    req = req
                        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                        .body(encoded);
                } else if let Some(json) = &options.json {
                    req = req.json(json);
                }
            }
            Method::File => {
                let path = options.file_name.clone().unwrap_or_default();
                debug!("Reading upload {:?}", path);
                let bytes = match tokio::fs::read(&path).await {
                    Ok(bytes) => bytes,
                    Err(source) => return Reply::fail(Error::ReadFile { path, source }),
                };

                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let part = Part::bytes(bytes).file_name(file_name);
                req = req.multipart(Form::new().part(options.file_param_name.clone(), part));
            }
        }

        debug!("Sending {} {}", method.http(), url);
        Reply::from_outcome(req.send().await).await
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
