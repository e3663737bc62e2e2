//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Inputs (`FfiBody`, `FfiCurlOptions`) are caller-owned and only read here.
//! Outputs (`FfiCurlResult`) are heap-allocated by this library and handed
//! back with `curlify_free_result`. Conversion helpers live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::collections::BTreeSet;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use curlify_core::{Body, Compression, CurlError, CurlOptions, RequestDescriptor};

/// Opaque handle to a request being described. C callers receive a pointer
/// to this from `curlify_request_new` and add headers to it in order.
pub struct FfiRequest {
    pub(crate) inner: RequestDescriptor,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// What `FfiBody::data` holds.
#[repr(C)]
#[derive(Clone, Copy)]
pub enum FfiBodyKind {
    Absent = 0,
    /// UTF-8 text.
    Text = 1,
    /// Arbitrary bytes; invalid UTF-8 is replaced when rendered.
    Bytes = 2,
    /// JSON text that must decode to an object.
    Json = 3,
}

/// A request body as a tagged byte buffer. `data` may be null only when
/// `len` is 0.
#[repr(C)]
pub struct FfiBody {
    pub kind: FfiBodyKind,
    pub data: *const u8,
    pub len: usize,
}

/// Compression flag mode as a C enum.
#[repr(C)]
#[derive(Clone, Copy)]
pub enum FfiCompression {
    Auto = 0,
    Always = 1,
    Never = 2,
}

impl From<FfiCompression> for Compression {
    fn from(c: FfiCompression) -> Self {
        match c {
            FfiCompression::Auto => Compression::Auto,
            FfiCompression::Always => Compression::Always,
            FfiCompression::Never => Compression::Never,
        }
    }
}

/// Rendering options. A null `redact_headers` keeps the default set
/// (`Authorization`, `X-Api-Key`, `Cookie`); a non-null pointer with
/// `redact_headers_len == 0` redacts nothing.
#[repr(C)]
pub struct FfiCurlOptions {
    pub compression: FfiCompression,
    pub verify: bool,
    pub redact_headers: *const *const c_char,
    pub redact_headers_len: u32,
}

/// Error codes returned in `FfiCurlResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidRequest = 1,
    UnencodableBody = 2,
    InvalidUtf8 = 3,
    NullArg = 4,
    Panic = 5,
    /// The rendered command holds a NUL byte (from the body) and cannot be
    /// returned as a C string.
    InteriorNul = 6,
}

/// Failures while reading caller-provided inputs.
pub(crate) enum InputError {
    NullArg(&'static str),
    InvalidUtf8(&'static str),
    Curl(CurlError),
}

impl From<CurlError> for InputError {
    fn from(err: CurlError) -> Self {
        InputError::Curl(err)
    }
}

/// Borrow a C string as `&str`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives the
/// returned reference.
pub(crate) unsafe fn c_str<'a>(ptr: *const c_char, name: &'static str) -> Result<&'a str, InputError> {
    if ptr.is_null() {
        return Err(InputError::NullArg(name));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| InputError::InvalidUtf8(name))
}

impl FfiBody {
    /// # Safety
    /// `data` must be valid for `len` bytes.
    pub(crate) unsafe fn to_core(&self) -> Result<Body, InputError> {
        let bytes: &[u8] = if self.len == 0 {
            &[]
        } else if self.data.is_null() {
            return Err(InputError::NullArg("body.data"));
        } else {
            unsafe { std::slice::from_raw_parts(self.data, self.len) }
        };

        Ok(match self.kind {
            FfiBodyKind::Absent => Body::Absent,
            FfiBodyKind::Text => {
                let text = std::str::from_utf8(bytes).map_err(|_| InputError::InvalidUtf8("body.data"))?;
                Body::Text(text.to_string())
            }
            FfiBodyKind::Bytes => Body::Bytes(bytes.to_vec()),
            FfiBodyKind::Json => {
                let value: serde_json::Value =
                    serde_json::from_slice(bytes).map_err(CurlError::from)?;
                Body::json(&value)?
            }
        })
    }
}

impl FfiCurlOptions {
    /// # Safety
    /// `redact_headers` must be null or point to `redact_headers_len` C strings.
    pub(crate) unsafe fn to_core(&self) -> Result<CurlOptions, InputError> {
        let mut options = CurlOptions::default()
            .compressed(Compression::from(self.compression))
            .verify(self.verify);

        if !self.redact_headers.is_null() {
            let ptrs = unsafe {
                std::slice::from_raw_parts(self.redact_headers, self.redact_headers_len as usize)
            };
            let mut names = BTreeSet::new();
            for &ptr in ptrs {
                names.insert(unsafe { c_str(ptr, "redact_headers[]") }?.to_string());
            }
            options.redact_headers = names;
        }
        Ok(options)
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Result envelope for `curlify_to_curl`.
///
/// On success `error_code` is `Ok`, `error_message` is null and `command`
/// holds the rendered command. On failure `command` is null and
/// `error_message` is a human-readable C string.
#[repr(C)]
pub struct FfiCurlResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub command: *mut c_char,
}

/// Convert an error message to a C string, dropping interior NULs.
fn message_c_string(s: String) -> *mut c_char {
    let s = if s.contains('\0') { s.replace('\0', "") } else { s };
    CString::new(s).unwrap_or_default().into_raw()
}

impl FfiCurlResult {
    /// Wrap a rendered command; a command containing NUL becomes `InteriorNul`.
    pub(crate) fn ok(command: String) -> *mut Self {
        match CString::new(command) {
            Ok(command) => Box::into_raw(Box::new(FfiCurlResult {
                error_code: FfiErrorCode::Ok,
                error_message: std::ptr::null_mut(),
                command: command.into_raw(),
            })),
            Err(err) => Self::error(
                FfiErrorCode::InteriorNul,
                format!("command contains a NUL byte at offset {}", err.nul_position()),
            ),
        }
    }

    fn error(error_code: FfiErrorCode, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiCurlResult {
            error_code,
            error_message: message_c_string(msg),
            command: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn from_error(err: InputError) -> *mut Self {
        match err {
            InputError::NullArg(name) => Self::error(FfiErrorCode::NullArg, format!("null argument: {name}")),
            InputError::InvalidUtf8(name) => {
                Self::error(FfiErrorCode::InvalidUtf8, format!("invalid UTF-8 in {name}"))
            }
            InputError::Curl(err) => {
                let code = match &err {
                    CurlError::InvalidRequest(_) => FfiErrorCode::InvalidRequest,
                    CurlError::UnencodableBody(_) => FfiErrorCode::UnencodableBody,
                };
                Self::error(code, err.to_string())
            }
        }
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg.to_string())
    }
}
