//! Error handling for the restyle library.
//!
//! Every failure a request can run into is represented by [`Error`]. Errors are
//! never thrown at the caller: they travel inside the [`Reply`](crate::Reply)
//! next to whatever status code and body the exchange produced.

use reqwest::StatusCode;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors that can happen when using restyle.
#[derive(Error, Debug)]
pub enum Error {
    /// The method or the URL of the request was empty.
    ///
    /// Detected before any client is built, so no network attempt is made.
    #[error("request method or request url is empty")]
    EmptyMethodOrUrl,

    /// The method name does not map to any supported dispatch.
    #[error("request method not supported: {0}")]
    UnsupportedMethod(String),

    /// Both form data and a JSON body were set on the same request.
    #[error("form data and json body are mutually exclusive")]
    ConflictingBody,

    /// A header name or value could not be used in an HTTP request.
    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The file to upload could not be read.
    #[error("read file error: {}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The runtime driving a blocking request could not be started.
    #[error("failed to start the request runtime")]
    Runtime {
        #[source]
        source: io::Error,
    },

    /// Error from the Reqwest library while building the client.
    ///
    /// Typically an invalid proxy URL or a TLS backend failure.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// The exchange failed in transport: connection refused, timeout, or an
    /// error raised by one of the middlewares.
    #[error("transport error: {source}")]
    Transport {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// The exchange completed but the server answered outside the 2xx range.
    ///
    /// Redirect statuses count too: a 3xx that was not followed ends up here.
    #[error("resp error: {status}")]
    Response { status: StatusCode },

    /// The body could not be decoded as JSON into the requested shape.
    #[error("json decode error")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Response { status, .. } => Some(*status),
            Error::Transport { source } => source.status(),
            Error::Reqwest { source } => source.status(),
            _ => None,
        }
    }

    /// Returns `true` if the error was detected before any I/O took place.
    pub fn is_invalid_call(&self) -> bool {
        matches!(
            self,
            Error::EmptyMethodOrUrl
                | Error::UnsupportedMethod(_)
                | Error::ConflictingBody
                | Error::InvalidHeader { .. }
        )
    }
}

/// Result type alias for operations that can fail with a restyle error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_call_classification() {
        assert!(Error::EmptyMethodOrUrl.is_invalid_call());
        assert!(Error::UnsupportedMethod("options".into()).is_invalid_call());
        assert!(Error::ConflictingBody.is_invalid_call());

        let read = Error::ReadFile {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(!read.is_invalid_call());
    }

    #[test]
    fn test_read_file_message() {
        let err = Error::ReadFile {
            path: PathBuf::from("/tmp/missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "read file error: /tmp/missing.txt");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_response_error_carries_status() {
        let err = Error::Response {
            status: StatusCode::NOT_MODIFIED,
        };
        assert_eq!(err.status(), Some(StatusCode::NOT_MODIFIED));
        assert_eq!(err.to_string(), "resp error: 304 Not Modified");
        assert!(!err.is_invalid_call());
    }

    #[test]
    fn test_status_absent_for_local_errors() {
        assert_eq!(Error::EmptyMethodOrUrl.status(), None);
        assert_eq!(Error::UnsupportedMethod("trace".into()).status(), None);
    }
}
