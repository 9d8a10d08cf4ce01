//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.
//!
//! Strings handed to C are NUL-terminated, so interior NUL bytes (possible in
//! a response body) are dropped during conversion.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use apixer_core::{
    ExecutionResult, HttpMethod, HttpRequest, HttpResponse, Outcome, ParseMethodError, RequestSpec,
};

/// Convert an owned string into a heap C string owned by the caller.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    let c = CString::new(s).unwrap_or_else(|err| {
        let mut bytes = err.into_vec();
        bytes.retain(|b| *b != 0);
        CString::new(bytes).unwrap_or_default()
    });
    c.into_raw()
}

/// Read a borrowed C string. Null reads as empty; invalid UTF-8 is replaced.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string valid for the call.
pub(crate) unsafe fn read_c_str(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Release a C string produced by `into_c_string`. Null is ignored.
pub(crate) fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Patch = 2,
    Put = 3,
    Delete = 4,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Patch => FfiHttpMethod::Patch,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// The form contents as the C caller holds them.
///
/// Any string may be null, which reads as empty. The library never frees
/// these fields. `method` takes an `FfiHttpMethod` discriminant; it is a
/// plain integer so out-of-range values can be rejected instead of read as
/// an invalid enum.
#[repr(C)]
pub struct FfiRequestSpec {
    pub url: *const c_char,
    pub method: u32,
    pub headers_text: *const c_char,
    pub body_text: *const c_char,
}

impl FfiRequestSpec {
    /// # Safety
    /// Every non-null field must point to a valid NUL-terminated string.
    pub(crate) unsafe fn to_core(&self) -> Result<RequestSpec, ParseMethodError> {
        let method = HttpMethod::try_from(self.method)?;
        Ok(unsafe {
            RequestSpec::new(read_c_str(self.url), method)
                .with_headers(read_c_str(self.headers_text))
                .with_body(read_c_str(self.body_text))
        })
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A resolved HTTP request described as C-compatible plain data.
///
/// Returned inside `FfiBuildResult` by `apixer_build_request`. The C caller
/// executes it and passes the response to `apixer_interpret_response`.
/// `body` is null for GET.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Vec<FfiHeader> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: into_c_string(k),
                    value: into_c_string(v),
                })
                .collect();
            // Exact-length allocation so `free` can rebuild it from `headers_len`.
            Box::into_raw(ffi_headers.into_boxed_slice()) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: into_c_string(req.url),
            headers,
            headers_len,
            body: req.body.map_or(std::ptr::null_mut(), into_c_string),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this after executing an `FfiHttpRequest`, then
/// passes a pointer to `apixer_interpret_response`. `content_type` is the
/// raw `Content-Type` header value, or null if the response had none. The
/// FFI layer reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub status_text: *const c_char,
    pub content_type: *const c_char,
    pub body: *const c_char,
}

impl FfiHttpResponse {
    /// # Safety
    /// Every non-null field must point to a valid NUL-terminated string.
    pub(crate) unsafe fn to_core(&self) -> HttpResponse {
        let headers = if self.content_type.is_null() {
            Vec::new()
        } else {
            vec![("content-type".to_string(), unsafe { read_c_str(self.content_type) })]
        };
        HttpResponse {
            status: self.status,
            status_text: unsafe { read_c_str(self.status_text) },
            headers,
            body: unsafe { read_c_str(self.body) },
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// How an execution ended.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiOutcome {
    Success = 0,
    HttpError = 1,
    ClientError = 2,
}

impl From<Outcome> for FfiOutcome {
    fn from(o: Outcome) -> Self {
        match o {
            Outcome::Success => FfiOutcome::Success,
            Outcome::HttpError => FfiOutcome::HttpError,
            Outcome::ClientError => FfiOutcome::ClientError,
        }
    }
}

/// `ExecutionResult` exposed to C. Both strings are always non-null.
#[repr(C)]
pub struct FfiExecutionResult {
    pub outcome: FfiOutcome,
    pub output_text: *mut c_char,
    pub message: *mut c_char,
}

impl FfiExecutionResult {
    pub(crate) fn from_core(result: ExecutionResult) -> *mut Self {
        Box::into_raw(Box::new(FfiExecutionResult {
            outcome: result.outcome.into(),
            output_text: into_c_string(result.output_text),
            message: into_c_string(result.message),
        }))
    }

    fn client_error(message: String) -> *mut Self {
        Self::from_core(ExecutionResult {
            outcome: Outcome::ClientError,
            output_text: String::new(),
            message,
        })
    }

    /// Result for input the library refuses before validation starts.
    pub(crate) fn invalid_arg(err: impl std::fmt::Display) -> *mut Self {
        Self::client_error(err.to_string())
    }

    /// Result for a null pointer argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::client_error(format!("null argument: {name}"))
    }

    /// Result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::client_error(format!("Request failed: {msg}"))
    }
}

/// Outcome of `apixer_build_request`: exactly one of the two pointers is
/// non-null.
#[repr(C)]
pub struct FfiBuildResult {
    pub request: *mut FfiHttpRequest,
    pub error: *mut FfiExecutionResult,
}

impl FfiBuildResult {
    pub(crate) fn ok(request: *mut FfiHttpRequest) -> *mut Self {
        Box::into_raw(Box::new(FfiBuildResult {
            request,
            error: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn err(error: *mut FfiExecutionResult) -> *mut Self {
        Box::into_raw(Box::new(FfiBuildResult {
            request: std::ptr::null_mut(),
            error,
        }))
    }
}
