//! Restyle describes HTTP requests declaratively and performs them with
//! [`reqwest`], returning a uniform [`Reply`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use restyle::{RequestOptions, ServiceBuilder};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), restyle::Error> {
//! let service = ServiceBuilder::new()
//!     .base_uri("http://localhost:50051")
//!     .timeout(Duration::from_secs(3))
//!     .build();
//!
//! let reply = service
//!     .send("get", "healthz", RequestOptions::new().retry(2).insecure_skip_verify(true))
//!     .await;
//! match reply.error() {
//!     Some(err) => eprintln!("err: {}", err),
//!     None => println!("data: {}", reply.text()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`service`] - The [`Service`] translator and its builder and configuration
//! - [`options`] - [`RequestOptions`] and parameter values
//! - [`http`] - Per-request client creation, retry, redirect and transport settings
//! - [`reply`] - The uniform [`Reply`] and the result normalizer
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`utils`] - Shared utility functions

pub mod error;
pub mod http;
pub mod method;
pub mod options;
pub mod reply;
pub mod service;
pub mod utils;

pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig, RedirectPolicy, RetryCondition, Transport};
pub use method::Method;
pub use options::{Cookie, ParamValue, Params, RequestOptions};
pub use reply::{ApiResponse, Reply};
pub use service::{Prepared, Service, ServiceBuilder, ServiceConfig};
