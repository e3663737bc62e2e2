//! Turn a captured HTTP request into an equivalent `curl` command line.
//!
//! # Overview
//! The caller hands over a `RequestDescriptor` (method, URL, ordered headers)
//! plus an optional `Body`, and gets back a single POSIX-shell-safe string.
//! Nothing is executed and nothing touches the network; whatever HTTP stack
//! produced the request is responsible for filling in the descriptor.
//!
//! # Design
//! - `CurlBuilder` is stateless apart from its `CurlOptions`, so one builder
//!   can be shared across threads and reused for any number of requests.
//! - Tokens are assembled unquoted first and quoted only when joined, which
//!   keeps `CurlBuilder::tokens` and `CurlBuilder::build` in lockstep.
//! - `Content-Length` is never copied: the executor recomputes it from the
//!   body it actually sends.
//! - Sensitive headers stay in place with a `<redacted>` value so header
//!   order (and anything signed over it) remains visible.

pub mod body;
pub mod builder;
pub mod error;
mod finite;
pub mod http;
pub mod options;
pub mod quote;

pub use body::Body;
pub use builder::{to_curl, CurlBuilder};
pub use error::CurlError;
pub use crate::http::RequestDescriptor;
pub use options::{Compression, CurlOptions};
