//! Shared utility functions.
//!
//! - [`url`] - joining request URLs onto the service base URI

pub mod url;

pub use url::join_url;
