//! HTTP module containing the client side of the options translator.
//!
//! - [`client`] - per-request client creation and middleware configuration
//! - [`retry`] - retry bounds and custom retry conditions
//! - [`redirect`] - redirect policies
//! - [`transport`] - TLS mode and connection-level settings

pub mod client;
pub mod redirect;
pub mod retry;
pub mod transport;

pub use client::{create_http_client, HttpClientConfig};
pub use redirect::{RedirectError, RedirectPolicy};
pub use retry::{RetryCondition, RetrySettings};
pub use transport::{TlsMode, Transport};
