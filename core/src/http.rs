//! The request shape consumed by the builder.
//!
//! # Design
//! `RequestDescriptor` is inert data: method, URL and an ordered header
//! list. It never holds a connection or a client handle, so any HTTP stack
//! can populate it. Headers are a `Vec` of pairs rather than a map because
//! names may repeat and their order is part of what gets reproduced.
//!
//! `from_parts` adapts the `http` crate's request head, which covers both
//! client-side requests (absolute URI) and server-side captures
//! (origin-form URI plus a `Host` header).

use serde::{Deserialize, Serialize};

/// A captured HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Append a header, keeping any existing header with the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Build a descriptor from an `http::request::Parts`.
    ///
    /// Header values that are not valid UTF-8 are decoded lossily. An
    /// origin-form URI is made absolute with the `Host` header when one is
    /// present, assuming plain `http`.
    pub fn from_parts(parts: &::http::request::Parts) -> Self {
        let url = match (parts.uri.scheme(), parts.headers.get(::http::header::HOST)) {
            (None, Some(host)) => {
                let host = String::from_utf8_lossy(host.as_bytes());
                let path = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or("/");
                format!("http://{host}{path}")
            }
            _ => parts.uri.to_string(),
        };

        Self {
            method: parts.method.as_str().to_string(),
            url,
            headers: collect_headers(&parts.headers),
        }
    }
}

impl<B> From<&::http::Request<B>> for RequestDescriptor {
    fn from(req: &::http::Request<B>) -> Self {
        Self {
            method: req.method().as_str().to_string(),
            url: req.uri().to_string(),
            headers: collect_headers(req.headers()),
        }
    }
}

fn collect_headers(headers: &::http::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_builder_keeps_duplicates_in_order() {
        let req = RequestDescriptor::new("GET", "http://example.com")
            .header("X-A", "1")
            .header("X-B", "2")
            .header("X-A", "3");
        assert_eq!(
            req.headers,
            vec![
                ("X-A".to_string(), "1".to_string()),
                ("X-B".to_string(), "2".to_string()),
                ("X-A".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn from_http_request_uses_absolute_uri() {
        let req = ::http::Request::builder()
            .method("POST")
            .uri("https://api.example.com/v1/items?x=1")
            .header("content-type", "application/json")
            .body(())
            .unwrap();
        let descriptor = RequestDescriptor::from(&req);
        assert_eq!(descriptor.method, "POST");
        assert_eq!(descriptor.url, "https://api.example.com/v1/items?x=1");
        assert_eq!(
            descriptor.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn from_parts_makes_origin_form_absolute_with_host() {
        let (parts, _) = ::http::Request::builder()
            .method("GET")
            .uri("/todos?page=2")
            .header("host", "127.0.0.1:8080")
            .body(())
            .unwrap()
            .into_parts();
        let descriptor = RequestDescriptor::from_parts(&parts);
        assert_eq!(descriptor.url, "http://127.0.0.1:8080/todos?page=2");
        assert_eq!(descriptor.headers[0].0, "host");
    }

    #[test]
    fn from_parts_without_host_keeps_uri() {
        let (parts, _) = ::http::Request::builder()
            .uri("/only/path")
            .body(())
            .unwrap()
            .into_parts();
        let descriptor = RequestDescriptor::from_parts(&parts);
        assert_eq!(descriptor.url, "/only/path");
    }

    #[test]
    fn from_parts_decodes_non_utf8_values_lossily() {
        let value = ::http::HeaderValue::from_bytes(b"caf\xe9").unwrap();
        let (parts, _) = ::http::Request::builder()
            .uri("http://example.com/")
            .header("x-name", value)
            .body(())
            .unwrap()
            .into_parts();
        let descriptor = RequestDescriptor::from_parts(&parts);
        assert_eq!(descriptor.headers[0].1, "caf\u{FFFD}");
    }

    #[test]
    fn deserializes_without_headers() {
        let req: RequestDescriptor =
            serde_json::from_str(r#"{"method":"GET","url":"http://example.com"}"#).unwrap();
        assert!(req.headers.is_empty());
    }
}
