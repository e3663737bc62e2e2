//! Error types for curl command generation.
//!
//! Both variants describe caller mistakes; there is nothing transient to
//! retry. Malformed UTF-8, empty bodies and duplicate headers are handled by
//! fallback policy inside the builder and never surface here.

use thiserror::Error;

/// Errors returned by `CurlBuilder::build` and friends.
#[derive(Debug, Error)]
pub enum CurlError {
    /// The descriptor is missing its method or URL.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The body could not be represented as a JSON object.
    #[error("unencodable body: {0}")]
    UnencodableBody(String),
}

impl From<serde_json::Error> for CurlError {
    fn from(err: serde_json::Error) -> Self {
        CurlError::UnencodableBody(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = CurlError::InvalidRequest("missing url".to_string());
        assert_eq!(err.to_string(), "invalid request: missing url");
    }

    #[test]
    fn serde_error_maps_to_unencodable_body() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CurlError = serde_err.into();
        assert!(matches!(err, CurlError::UnencodableBody(_)));
    }
}
