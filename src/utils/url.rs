//! URL resolution against the service base URI.

/// Join a base URI and a request URL with exactly one slash.
///
/// An empty base returns `url` unchanged.
///
/// # Example
///
/// ```rust
/// use restyle::utils::join_url;
///
/// assert_eq!(join_url("http://host/api/", "users"), "http://host/api/users");
/// assert_eq!(join_url("", "http://host/users"), "http://host/users");
/// ```
pub fn join_url(base: &str, url: &str) -> String {
    if base.is_empty() {
        return url.to_string();
    }

    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://host/api/", "users"), "http://host/api/users");
        assert_eq!(join_url("http://host/api", "users"), "http://host/api/users");
        assert_eq!(join_url("http://host/api//", "/users"), "http://host/api/users");
        assert_eq!(join_url("http://host", "a/b?x=1"), "http://host/a/b?x=1");
    }

    #[test]
    fn test_join_url_without_base() {
        assert_eq!(join_url("", "http://host/users"), "http://host/users");
        assert_eq!(join_url("", "/relative"), "/relative");
    }
}
