//! Request adapter for mapping framework HTTP requests onto the service.

use std::collections::HashMap;

use crate::Tainted;

/// Framework-agnostic view of one incoming HTTP request.
///
/// Holds the request path, the headers (looked up case-insensitively) and the
/// raw body. The body is wrapped in [`Tainted`] on the way in; the service
/// decodes it and runs it through envelope validation before anything reads it.
/// Framework integrations should build one of these per request, typically via
/// `From<FrameworkRequest>`.
///
/// # Examples
///
/// ```
/// use scoring_core::web::RequestAdapter;
///
/// let mut adapter = RequestAdapter::new("/method/", br#"{"login": "h&f"}"#.to_vec());
/// adapter.add_header("X-Request-Id", "req-12345");
///
/// assert_eq!(adapter.route(), "method");
/// assert_eq!(adapter.header("x-request-id"), Some("req-12345"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    path: String,
    /// Keys are stored lowercased
    headers: HashMap<String, String>,
    body: Tainted<Vec<u8>>,
}

impl RequestAdapter {
    /// Creates an adapter for a request with the given path and raw body.
    pub fn new(path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            headers: HashMap::new(),
            body: Tainted::new(body.into()),
        }
    }

    /// Adds a header. A repeated name replaces the earlier value.
    pub fn add_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Returns a header value, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the path as received.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the path with surrounding slashes removed, used for routing.
    pub fn route(&self) -> &str {
        self.path.trim_matches('/')
    }

    /// Returns the raw, not yet validated body.
    pub fn body(&self) -> &Tainted<Vec<u8>> {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_trims_slashes() {
        assert_eq!(RequestAdapter::new("/method/", "").route(), "method");
        assert_eq!(RequestAdapter::new("method", "").route(), "method");
        assert_eq!(RequestAdapter::new("/", "").route(), "");
        assert_eq!(RequestAdapter::new("/method/", "").path(), "/method/");
    }

    #[test]
    fn headers_are_case_insensitive() {
        let mut adapter = RequestAdapter::new("/method/", "");
        adapter.add_header("X-Request-ID", "abc");

        assert_eq!(adapter.header("x-request-id"), Some("abc"));
        assert_eq!(adapter.header("X-REQUEST-ID"), Some("abc"));
        assert_eq!(adapter.header("Content-Length"), None);

        adapter.add_header("x-request-id", "def");
        assert_eq!(adapter.header("X-Request-Id"), Some("def"));
    }

    #[test]
    fn body_stays_tainted() {
        let adapter = RequestAdapter::new("/method/", "{}");
        assert_eq!(adapter.body().as_inner(), b"{}");
    }
}
