//! The uniform request result.
//!
//! Every request produces a [`Reply`]: a status code, the raw body and an
//! optional [`Error`]. A reply can carry a body *and* an error, e.g. a `404`
//! page, so callers check [`Reply::error`] before trusting the rest.
//!
//! # Examples
//!
//! ```rust,no_run
//! use restyle::{ApiResponse, RequestOptions, ServiceBuilder};
//!
//! # async fn example() -> Result<(), restyle::Error> {
//! let service = ServiceBuilder::new().base_uri("http://localhost:8080/api").build();
//! let reply = service.send("get", "status", RequestOptions::new()).await;
//!
//! if let Some(err) = reply.error() {
//!     eprintln!("request failed ({}): {}", reply.status_code(), err);
//! } else if let Some(res) = reply.json::<ApiResponse>()? {
//!     println!("{} {}", res.code, res.message);
//! }
//! # Ok(())
//! # }
//! ```

use crate::{Error, Result};
use reqwest::{Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

/// Result of a request.
#[derive(Debug, Default)]
pub struct Reply {
    /// HTTP status code, `0` when no response was received.
    status_code: u16,
    /// Error raised while performing the request.
    error: Option<Error>,
    /// Raw response body.
    body: Vec<u8>,
}

impl Reply {
    /// Create a new [`Reply`].
    pub fn new(status_code: u16, body: Vec<u8>, error: Option<Error>) -> Self {
        Self {
            status_code,
            error,
            body,
        }
    }

    /// A reply for a request that failed without a response.
    pub fn fail(error: Error) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Attach a status code.
    pub fn with_status(self, status: StatusCode) -> Self {
        Self {
            status_code: status.as_u16(),
            ..self
        }
    }

    /// Get the reply's status code, `0` if unknown.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Get the reply's status code as a [`StatusCode`], if one is known.
    pub fn status(&self) -> Option<StatusCode> {
        match self.status_code {
            0 => None,
            code => StatusCode::from_u16(code).ok(),
        }
    }

    /// Get a reference to the reply's error.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Take the reply's error.
    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    /// Returns `true` if the request completed without error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Get a reference to the reply's body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// The body as text. Invalid UTF-8 sequences are replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decode the body as JSON.
    ///
    /// An empty body decodes to `Ok(None)`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if self.body.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&self.body)?))
    }

    /// Convert the transport outcome into a reply.
    ///
    /// - a transport error keeps the status it carries, if any;
    /// - a completed exchange keeps status and body, and any status outside
    ///   2xx (redirects included) adds an [`Error::Response`].
    pub async fn from_outcome(
        outcome: std::result::Result<Response, reqwest_middleware::Error>,
    ) -> Self {
        let res = match outcome {
            Ok(res) => res,
            Err(e) => {
                let status_code = e.status().map(|s| s.as_u16()).unwrap_or(0);
                return Self::new(status_code, Vec::new(), Some(Error::from(e)));
            }
        };

        let status = res.status();

        let body = match res.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                return Self::new(
                    status.as_u16(),
                    Vec::new(),
                    Some(Error::from(reqwest_middleware::Error::from(e))),
                );
            }
        };
        debug!("Received {} with {} bytes", status, body.len());

        let error = (!status.is_success()).then_some(Error::Response { status });
        Self::new(status.as_u16(), body, error)
    }
}

/// The standard `{code, message, data}` API envelope.
///
/// Keys are also accepted capitalized (`Code`, `Message`, `Data`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = serde_json::Value> {
    #[serde(default, alias = "Code")]
    pub code: i64,
    #[serde(default, alias = "Message")]
    pub message: String,
    #[serde(alias = "Data")]
    pub data: Option<T>,
}
