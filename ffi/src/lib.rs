//! C-ABI wrapper around `apixer-core`.
//!
//! # Overview
//! Lets a UI written in any language with a C FFI submit a request form and
//! get back a display-ready result, either by letting this library perform
//! the round-trip (`apixer_execute`) or by doing the I/O itself between
//! `apixer_build_request` and `apixer_interpret_response`.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Null arguments and panics come back as a `ClientError` result, never as
//!   a null result pointer, so the caller always has a message to show.
//! - The C caller owns all returned pointers and must call the matching
//!   `apixer_free_*` function to release them.

pub mod types;

use std::panic::catch_unwind;
use std::sync::OnceLock;

use apixer_core::{interpret, resolve, RequestExecutor, UreqTransport};
use log::debug;

use types::*;

/// Shared executor so repeated submissions reuse the agent's connection pool.
fn executor() -> &'static RequestExecutor<UreqTransport> {
    static EXECUTOR: OnceLock<RequestExecutor<UreqTransport>> = OnceLock::new();
    EXECUTOR.get_or_init(|| RequestExecutor::new(UreqTransport::new()))
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

/// Install `env_logger` as the log backend, filtered by `RUST_LOG`.
///
/// Returns false if a logger was already installed.
#[unsafe(no_mangle)]
pub extern "C" fn apixer_init_logging() -> bool {
    catch_unwind(|| env_logger::try_init().is_ok()).unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Validate `spec`, send it, and interpret the response.
///
/// Blocks until the response body has been read. Never returns null.
/// The caller must free the result with `apixer_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn apixer_execute(spec: *const FfiRequestSpec) -> *mut FfiExecutionResult {
    catch_unwind(|| {
        if spec.is_null() {
            return FfiExecutionResult::null_arg("spec");
        }
        let spec = match unsafe { (*spec).to_core() } {
            Ok(spec) => spec,
            Err(e) => return FfiExecutionResult::invalid_arg(e),
        };
        FfiExecutionResult::from_core(executor().execute(&spec))
    })
    .unwrap_or_else(|_| FfiExecutionResult::panic("panic in apixer_execute"))
}

/// Validate `spec` and produce the request to send, without any I/O.
///
/// On success `request` is set; on invalid input `error` carries the
/// `ClientError` to display. Never returns null.
/// The caller must free the result with `apixer_free_build_result`.
#[unsafe(no_mangle)]
pub extern "C" fn apixer_build_request(spec: *const FfiRequestSpec) -> *mut FfiBuildResult {
    catch_unwind(|| {
        if spec.is_null() {
            return FfiBuildResult::err(FfiExecutionResult::null_arg("spec"));
        }
        let spec = match unsafe { (*spec).to_core() } {
            Ok(spec) => spec,
            Err(e) => return FfiBuildResult::err(FfiExecutionResult::invalid_arg(e)),
        };
        match resolve(&spec).and_then(|resolved| resolved.to_http_request()) {
            Ok(req) => {
                debug!("built {} {} for host dispatch", req.method, req.url);
                FfiBuildResult::ok(FfiHttpRequest::from_core(req))
            }
            Err(e) => FfiBuildResult::err(FfiExecutionResult::from_core(e.into())),
        }
    })
    .unwrap_or_else(|_| {
        FfiBuildResult::err(FfiExecutionResult::panic("panic in apixer_build_request"))
    })
}

/// Interpret a response the caller obtained by executing an `FfiHttpRequest`.
///
/// Never returns null. The caller must free the result with
/// `apixer_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn apixer_interpret_response(
    response: *const FfiHttpResponse,
) -> *mut FfiExecutionResult {
    catch_unwind(|| {
        if response.is_null() {
            return FfiExecutionResult::null_arg("response");
        }
        let response = unsafe { (*response).to_core() };
        FfiExecutionResult::from_core(interpret(&response))
    })
    .unwrap_or_else(|_| FfiExecutionResult::panic("panic in apixer_interpret_response"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiExecutionResult`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn apixer_free_result(result: *mut FfiExecutionResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.output_text);
        free_c_string(result.message);
    });
}

/// Free an `FfiHttpRequest`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn apixer_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiBuildResult` and whichever of its pointers is set. Safe to
/// call with null.
#[unsafe(no_mangle)]
pub extern "C" fn apixer_free_build_result(result: *mut FfiBuildResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        apixer_free_request(result.request);
        apixer_free_result(result.error);
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
