//! Request payloads accepted by the builder.
//!
//! # Design
//! `Absent` is a variant of its own rather than an `Option` wrapper, so an
//! empty `Text("")` stays distinguishable from "no body supplied" all the way
//! to the rendered `-d ''`.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CurlError;
use crate::finite;

/// A request body as handed to `CurlBuilder`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    Absent,
    Text(String),
    /// Raw bytes, decoded as UTF-8 with replacement characters on render.
    Bytes(Vec<u8>),
    /// A JSON object, rendered compactly with keys in insertion order.
    Json(Map<String, Value>),
}

impl Body {
    /// Encode any serializable value as a JSON object body.
    ///
    /// Fails with `UnencodableBody` if serialization fails (e.g. a map with
    /// non-string keys), if a float is `NaN` or infinite, or if the value is
    /// not a JSON object.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, CurlError> {
        finite::check(value).map_err(|err| CurlError::UnencodableBody(err.to_string()))?;
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(Body::Json(map)),
            other => Err(CurlError::UnencodableBody(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Body::Absent)
    }

    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Body::Absent => "absent",
            Body::Text(_) => "text",
            Body::Bytes(_) => "bytes",
            Body::Json(_) => "json",
        }
    }

    /// Render the body as the string passed to `-d`, or `None` if absent.
    pub fn render(&self) -> Result<Option<Cow<'_, str>>, CurlError> {
        Ok(match self {
            Body::Absent => None,
            Body::Text(text) => Some(Cow::Borrowed(text.as_str())),
            Body::Bytes(bytes) => Some(String::from_utf8_lossy(bytes)),
            // serde_json writes non-ASCII characters literally and without
            // padding, which is the compact form we want.
            Body::Json(map) => Some(Cow::Owned(serde_json::to_string(map)?)),
        })
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Bytes(bytes.to_vec())
    }
}

impl From<Map<String, Value>> for Body {
    fn from(map: Map<String, Value>) -> Self {
        Body::Json(map)
    }
}
