//! HTTP server that answers every request with the curl command that
//! reproduces it.
//!
//! # Design
//! The router has a single fallback handler, so every method and path is
//! echoed. The request head goes through `RequestDescriptor::from_parts`
//! and the body is read in full (up to `MAX_BODY_BYTES`) as raw bytes; an
//! empty body is treated as absent. The only shared state is an immutable
//! `CurlBuilder`.

use std::error::Error as _;
use std::sync::Arc;

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use curlify_core::{Body, Compression, CurlBuilder, CurlOptions, RequestDescriptor};
use http_body_util::LengthLimitError;
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;

/// Largest request body the server will read before answering 413.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Header names are lowercased by the `http` crate, so the server's default
/// redaction set is lowercase too.
pub const DEFAULT_REDACT: [&str; 3] = ["authorization", "x-api-key", "cookie"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),

    #[error("invalid CURL_ECHO_COMPRESSED: {0}")]
    InvalidCompression(String),
}

/// Server configuration, normally read from the environment.
#[derive(Debug, Clone)]
pub struct EchoConfig {
    pub port: u16,
    pub options: CurlOptions,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            options: CurlOptions::default().redact_headers(DEFAULT_REDACT),
        }
    }
}

impl EchoConfig {
    /// Read `PORT`, `CURL_ECHO_REDACT`, `CURL_ECHO_INSECURE` and
    /// `CURL_ECHO_COMPRESSED`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }
        if let Some(redact) = lookup("CURL_ECHO_REDACT") {
            let names = redact
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string);
            config.options = config.options.redact_headers(names);
        }
        if let Some(insecure) = lookup("CURL_ECHO_INSECURE") {
            let insecure = matches!(
                insecure.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
            config.options = config.options.verify(!insecure);
        }
        if let Some(mode) = lookup("CURL_ECHO_COMPRESSED") {
            let mode: Compression = mode.parse().map_err(ConfigError::InvalidCompression)?;
            config.options = config.options.compressed(mode);
        }

        Ok(config)
    }
}

/// JSON reply sent when the client asks for `application/json`.
#[derive(Debug, Serialize)]
pub struct EchoReply {
    pub descriptor: RequestDescriptor,
    pub command: String,
}

pub fn app(config: EchoConfig) -> Router {
    let builder = Arc::new(CurlBuilder::new(config.options));
    Router::new().fallback(echo).with_state(builder)
}

pub async fn run(listener: TcpListener, config: EchoConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

async fn echo(State(builder): State<Arc<CurlBuilder>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let descriptor = RequestDescriptor::from_parts(&parts);

    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            let status = if is_length_limit(&err) {
                StatusCode::PAYLOAD_TOO_LARGE
            } else {
                StatusCode::BAD_REQUEST
            };
            tracing::warn!(error = %err, %status, "failed to read request body");
            return (status, err.to_string()).into_response();
        }
    };
    let body = if bytes.is_empty() {
        Body::Absent
    } else {
        Body::Bytes(bytes.to_vec())
    };

    let command = match builder.build(&descriptor, &body) {
        Ok(command) => command,
        Err(err) => return (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    };
    tracing::debug!(method = %parts.method, uri = %parts.uri, "echoed request");

    if wants_json(&parts.headers) {
        Json(EchoReply { descriptor, command }).into_response()
    } else {
        command.into_response()
    }
}

/// True if the body read stopped at `MAX_BODY_BYTES` rather than failing.
fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = err.source();
    while let Some(err) = source {
        if err.is::<LengthLimitError>() {
            return true;
        }
        source = err.source();
    }
    false
}

fn wants_json(headers: &axum::http::HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains("application/json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = EchoConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.options.verify);
        assert_eq!(config.options.compressed, Compression::Auto);
        assert!(config.options.is_redacted("authorization"));
        assert!(!config.options.is_redacted("Authorization"));
    }

    #[test]
    fn reads_every_variable() {
        let config = EchoConfig::from_lookup(lookup(&[
            ("PORT", "8081"),
            ("CURL_ECHO_REDACT", "x-secret, , x-token"),
            ("CURL_ECHO_INSECURE", "TRUE"),
            ("CURL_ECHO_COMPRESSED", "never"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8081);
        assert!(!config.options.verify);
        assert_eq!(config.options.compressed, Compression::Never);
        assert_eq!(config.options.redact_headers.len(), 2);
        assert!(config.options.is_redacted("x-secret"));
        assert!(config.options.is_redacted("x-token"));
    }

    #[test]
    fn rejects_bad_port() {
        let err = EchoConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
    }

    #[test]
    fn rejects_bad_compression() {
        let err = EchoConfig::from_lookup(lookup(&[("CURL_ECHO_COMPRESSED", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCompression(_)));
    }

    #[test]
    fn echo_reply_serializes_descriptor_and_command() {
        let reply = EchoReply {
            descriptor: RequestDescriptor::new("GET", "http://example.com"),
            command: "curl -X GET http://example.com".to_string(),
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["descriptor"]["method"], "GET");
        assert_eq!(json["command"], "curl -X GET http://example.com");
    }
}
