//! C-ABI wrapper around `curlify-core`.
//!
//! # Overview
//! Lets any language with a C FFI describe a request (method, URL, ordered
//! headers) and get back the equivalent curl command line.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - The request is an opaque handle built up header by header, which keeps
//!   duplicate names and their order intact without C-side arrays.
//! - Body and options are plain `#[repr(C)]` structs the caller owns; null
//!   means "absent" and "defaults" respectively.
//! - The C caller owns all returned pointers and must call the matching
//!   `curlify_*_free` function to release them.

pub mod types;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use curlify_core::{Body, CurlBuilder, CurlOptions, RequestDescriptor};

use types::*;

// ---------------------------------------------------------------------------
// Request lifecycle
// ---------------------------------------------------------------------------

/// Create a request descriptor for `method` and `url`.
///
/// Returns null if either argument is null or not valid UTF-8. Empty values
/// are accepted here and reported by `curlify_to_curl`.
/// The caller must free the returned pointer with `curlify_request_free`.
#[unsafe(no_mangle)]
pub extern "C" fn curlify_request_new(method: *const c_char, url: *const c_char) -> *mut FfiRequest {
    catch_unwind(|| {
        let (Ok(method), Ok(url)) = (unsafe { c_str(method, "method") }, unsafe { c_str(url, "url") }) else {
            return std::ptr::null_mut();
        };
        let inner = RequestDescriptor::new(method, url);
        Box::into_raw(Box::new(FfiRequest { inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Append a header to `request`. Headers are rendered in the order added.
///
/// Returns false if any argument is null or not valid UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn curlify_request_add_header(
    request: *mut FfiRequest,
    name: *const c_char,
    value: *const c_char,
) -> bool {
    catch_unwind(|| {
        if request.is_null() {
            return false;
        }
        let (Ok(name), Ok(value)) = (unsafe { c_str(name, "name") }, unsafe { c_str(value, "value") }) else {
            return false;
        };
        let request = unsafe { &mut *request };
        request.inner.headers.push((name.to_string(), value.to_string()));
        true
    })
    .unwrap_or(false)
}

/// Free a request created by `curlify_request_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn curlify_request_free(request: *mut FfiRequest) {
    if !request.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(request) });
        });
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render `request` as a curl command.
///
/// `body` may be null (no body); `options` may be null (defaults). Never
/// returns null. The caller must free the result with `curlify_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn curlify_to_curl(
    request: *const FfiRequest,
    body: *const FfiBody,
    options: *const FfiCurlOptions,
) -> *mut FfiCurlResult {
    catch_unwind(|| {
        if request.is_null() {
            return FfiCurlResult::from_error(InputError::NullArg("request"));
        }
        let request = unsafe { &*request };

        let body = if body.is_null() {
            Ok(Body::Absent)
        } else {
            unsafe { (*body).to_core() }
        };
        let options = if options.is_null() {
            Ok(CurlOptions::default())
        } else {
            unsafe { (*options).to_core() }
        };

        let rendered = body.and_then(|body| {
            let builder = CurlBuilder::new(options?);
            Ok(builder.build(&request.inner, &body)?)
        });
        match rendered {
            Ok(command) => FfiCurlResult::ok(command),
            Err(e) => FfiCurlResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiCurlResult::panic("panic in curlify_to_curl"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiCurlResult` returned by `curlify_to_curl`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn curlify_free_result(result: *mut FfiCurlResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.command.is_null() {
            drop(unsafe { CString::from_raw(result.command) });
        }
    });
}

/// Take ownership of a result's command string, leaving null in its place.
///
/// Returns null if `result` is null or carries no command. Free the string
/// with `curlify_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn curlify_result_take_command(result: *mut FfiCurlResult) -> *mut c_char {
    if result.is_null() {
        return std::ptr::null_mut();
    }
    let result = unsafe { &mut *result };
    std::mem::replace(&mut result.command, std::ptr::null_mut())
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn curlify_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
