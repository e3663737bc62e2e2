//! Assemble a `curl` command line from a request descriptor.
//!
//! # Design
//! Every piece of output is first collected as a `CommandToken` (an optional
//! flag plus an optional value) in a fixed order: method, headers, `-G` and
//! body, `--compressed`, `--insecure`, URL. Flattening drops the missing
//! halves; quoting happens only in `build`, so `tokens` yields the exact argv
//! the shell would reconstruct.

use std::borrow::Cow;

use crate::body::Body;
use crate::error::CurlError;
use crate::http::RequestDescriptor;
use crate::options::{Compression, CurlOptions, REDACTED};
use crate::quote;

const COMPRESSED_ENCODINGS: [&str; 3] = ["gzip", "deflate", "br"];

/// One shell argument or flag/value pair before quoting.
#[derive(Debug)]
struct CommandToken<'a> {
    flag: Option<&'static str>,
    value: Option<Cow<'a, str>>,
}

impl<'a> CommandToken<'a> {
    fn flag(flag: &'static str) -> Self {
        Self { flag: Some(flag), value: None }
    }

    fn pair(flag: &'static str, value: impl Into<Cow<'a, str>>) -> Self {
        Self { flag: Some(flag), value: Some(value.into()) }
    }

    fn value(value: impl Into<Cow<'a, str>>) -> Self {
        Self { flag: None, value: Some(value.into()) }
    }
}

/// Renders `RequestDescriptor`s as curl commands under fixed `CurlOptions`.
///
/// Holds no per-request state; share one instance freely.
#[derive(Debug, Clone, Default)]
pub struct CurlBuilder {
    options: CurlOptions,
}

impl CurlBuilder {
    pub fn new(options: CurlOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CurlOptions {
        &self.options
    }

    /// Render `request` and `body` as a single shell command string.
    pub fn build(&self, request: &RequestDescriptor, body: &Body) -> Result<String, CurlError> {
        let tokens = self.command_tokens(request, body)?;
        Ok(quote::join(flatten(&tokens)))
    }

    /// The unquoted argument vector, starting with `curl`.
    pub fn tokens(&self, request: &RequestDescriptor, body: &Body) -> Result<Vec<String>, CurlError> {
        let tokens = self.command_tokens(request, body)?;
        Ok(flatten(&tokens).into_iter().map(str::to_string).collect())
    }

    fn command_tokens<'a>(
        &self,
        request: &'a RequestDescriptor,
        body: &'a Body,
    ) -> Result<Vec<CommandToken<'a>>, CurlError> {
        if request.method.trim().is_empty() {
            return Err(CurlError::InvalidRequest("missing method".to_string()));
        }
        if request.url.trim().is_empty() {
            return Err(CurlError::InvalidRequest("missing url".to_string()));
        }

        let method = request.method.to_uppercase();
        let mut tokens = vec![
            CommandToken::value("curl"),
            CommandToken::pair("-X", method.clone()),
        ];

        let mut redacted = 0usize;
        for (name, value) in &request.headers {
            if name.eq_ignore_ascii_case("content-length") {
                continue;
            }
            let value = if self.options.is_redacted(name) {
                redacted += 1;
                REDACTED
            } else {
                value.as_str()
            };
            tokens.push(CommandToken::pair("-H", format!("{name}: {value}")));
        }

        if let Some(data) = body.render()? {
            if method == "GET" || method == "HEAD" {
                tokens.push(CommandToken::flag("-G"));
            }
            tokens.push(CommandToken::pair("-d", data));
        }

        let compressed = match self.options.compressed {
            Compression::Always => true,
            Compression::Never => false,
            Compression::Auto => needs_compressed_flag(&request.headers),
        };
        if compressed {
            tokens.push(CommandToken::flag("--compressed"));
        }

        if !self.options.verify {
            tokens.push(CommandToken::flag("--insecure"));
        }

        tokens.push(CommandToken::value(request.url.as_str()));

        tracing::debug!(
            method = %method,
            headers = request.headers.len(),
            redacted,
            body = body.kind(),
            compressed,
            insecure = !self.options.verify,
            "built curl command"
        );
        Ok(tokens)
    }
}

/// Render with `CurlOptions::default()`.
pub fn to_curl(request: &RequestDescriptor, body: &Body) -> Result<String, CurlError> {
    CurlBuilder::default().build(request, body)
}

fn flatten<'t>(tokens: &'t [CommandToken<'_>]) -> Vec<&'t str> {
    let mut words = Vec::with_capacity(tokens.len() * 2);
    for token in tokens {
        if let Some(flag) = token.flag {
            words.push(flag);
        }
        if let Some(value) = token.value.as_deref() {
            words.push(value);
        }
    }
    words
}

/// True if any `Accept-Encoding` header asks for gzip, deflate or brotli.
fn needs_compressed_flag(headers: &[(String, String)]) -> bool {
    headers.iter().any(|(name, value)| {
        if !name.eq_ignore_ascii_case("accept-encoding") {
            return false;
        }
        let value = value.to_ascii_lowercase();
        COMPRESSED_ENCODINGS.iter().any(|enc| value.contains(enc))
    })
}
