//! Supported request methods.

use crate::Error;
use std::{fmt, str::FromStr};

/// A request method accepted by the translator.
///
/// `File` is not an HTTP verb: it uploads a file as multipart form data with
/// a `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Delete,
    Head,
    Post,
    Put,
    Patch,
    File,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Delete => "delete",
            Method::Head => "head",
            Method::Post => "post",
            Method::Put => "put",
            Method::Patch => "patch",
            Method::File => "file",
        }
    }

    /// HTTP verb used on the wire.
    pub fn http(&self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Delete => reqwest::Method::DELETE,
            Method::Head => reqwest::Method::HEAD,
            Method::Post | Method::File => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
        }
    }

    /// Methods taking query parameters.
    pub fn takes_query(&self) -> bool {
        matches!(self, Method::Get | Method::Delete | Method::Head)
    }

    /// Methods taking a form or JSON body.
    pub fn takes_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "delete" => Ok(Method::Delete),
            "head" => Ok(Method::Head),
            "post" => Ok(Method::Post),
            "put" => Ok(Method::Put),
            "patch" => Ok(Method::Patch),
            "file" => Ok(Method::File),
            _ => Err(Error::UnsupportedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("Patch".parse::<Method>().unwrap(), Method::Patch);
        assert_eq!("file".parse::<Method>().unwrap(), Method::File);
    }

    #[test]
    fn test_parse_unsupported() {
        let err = "options".parse::<Method>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedMethod(m) if m == "options"));
    }

    #[test]
    fn test_file_posts() {
        assert_eq!(Method::File.http(), reqwest::Method::POST);
        assert!(!Method::File.takes_body());
        assert!(!Method::File.takes_query());
    }
}
