//! Formatting policies applied by `CurlBuilder`.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Header names redacted when no explicit set is configured.
pub const DEFAULT_REDACT_HEADERS: [&str; 3] = ["Authorization", "X-Api-Key", "Cookie"];

/// Placeholder written in place of a redacted header value.
pub const REDACTED: &str = "<redacted>";

/// Whether to emit `--compressed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Emit the flag when the request's `Accept-Encoding` asked for
    /// gzip, deflate or brotli.
    #[default]
    Auto,
    Always,
    Never,
}

impl From<bool> for Compression {
    fn from(enabled: bool) -> Self {
        if enabled {
            Compression::Always
        } else {
            Compression::Never
        }
    }
}

impl FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Compression::Auto),
            "always" | "true" | "1" => Ok(Compression::Always),
            "never" | "false" | "0" => Ok(Compression::Never),
            other => Err(format!("unknown compression mode: {other}")),
        }
    }
}

/// Options controlling how a request is rendered.
///
/// `redact_headers` is matched case-sensitively against the header name as
/// it appears in the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlOptions {
    pub compressed: Compression,
    /// `false` adds `--insecure`.
    pub verify: bool,
    pub redact_headers: BTreeSet<String>,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            compressed: Compression::Auto,
            verify: true,
            redact_headers: DEFAULT_REDACT_HEADERS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl CurlOptions {
    pub fn compressed(mut self, compressed: impl Into<Compression>) -> Self {
        self.compressed = compressed.into();
        self
    }

    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Replace the redaction set.
    pub fn redact_headers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.redact_headers = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_redacted(&self, name: &str) -> bool {
        self.redact_headers.contains(name)
    }
}
