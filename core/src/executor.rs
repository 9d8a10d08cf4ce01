//! Turns a `RequestSpec` into an `ExecutionResult`.
//!
//! # Design
//! The pipeline is split the same way as every other build/parse pair in this
//! crate: `resolve` validates input without touching the network, `interpret`
//! reads a response without knowing where it came from, and
//! `RequestExecutor::execute` runs a `Transport` in between. Each stage
//! returns `Result<_, RequestError>` and short-circuits with `?`; only
//! `execute` folds errors into a `ClientError` result, so nothing escapes as
//! an `Err` or a panic.

use log::{debug, warn};
use serde_json::Value;

use crate::error::RequestError;
use crate::http::HttpResponse;
use crate::transport::Transport;
use crate::types::{ExecutionResult, Outcome, RequestSpec, ResolvedRequest, DEFAULT_CONTENT_TYPE};

pub const SUCCESS_MESSAGE: &str = "API request successful.";
pub const HEADERS_NOT_OBJECT: &str = "Headers must be a valid JSON object.";

/// Stateless executor around an injected transport.
#[derive(Debug, Clone, Default)]
pub struct RequestExecutor<T> {
    transport: T,
}

impl<T: Transport> RequestExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate, dispatch and interpret one submission.
    pub fn execute(&self, spec: &RequestSpec) -> ExecutionResult {
        match self.try_execute(spec) {
            Ok(result) => result,
            Err(err) => {
                warn!("{} {}: {err}", spec.method, spec.url.trim());
                err.into()
            }
        }
    }

    fn try_execute(&self, spec: &RequestSpec) -> Result<ExecutionResult, RequestError> {
        let request = resolve(spec)?.to_http_request()?;
        debug!(
            "dispatching {} {} with {} header(s)",
            request.method,
            request.url,
            request.headers.len()
        );
        let response = self.transport.send(&request)?;
        let output_text = render_body(&response)?;
        Ok(classify(&response, output_text))
    }
}

/// Validate a spec: URL first, then body, then headers.
pub fn resolve(spec: &RequestSpec) -> Result<ResolvedRequest, RequestError> {
    let url = spec.url.trim();
    if url.is_empty() {
        return Err(RequestError::EmptyUrl);
    }

    let body = if spec.method.sends_body() {
        let mut value: Value = serde_json::from_str(&spec.body_text)
            .map_err(|e| RequestError::InvalidBody(e.to_string()))?;
        normalize_numbers(&mut value);
        Some(value)
    } else {
        None
    };

    let headers = merge_headers(&spec.headers_text)?;

    Ok(ResolvedRequest {
        url: url.to_string(),
        method: spec.method,
        headers,
        body,
    })
}

/// Shallow-merge a JSON object over the default headers.
///
/// Names match exactly, the way keys collide in a JSON object. An overridden
/// header keeps its position; new ones are appended in document order.
pub fn merge_headers(headers_text: &str) -> Result<Vec<(String, String)>, RequestError> {
    let (name, value) = DEFAULT_CONTENT_TYPE;
    let mut headers = vec![(name.to_string(), value.to_string())];
    if headers_text.trim().is_empty() {
        return Ok(headers);
    }

    let parsed: Value = serde_json::from_str(headers_text)
        .map_err(|e| RequestError::InvalidHeaders(e.to_string()))?;
    let Value::Object(custom) = parsed else {
        return Err(RequestError::InvalidHeaders(HEADERS_NOT_OBJECT.to_string()));
    };

    for (name, value) in custom {
        let value = match value {
            Value::String(s) => s,
            other => other.to_string(),
        };
        match headers.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => headers.push((name, value)),
        }
    }
    Ok(headers)
}

/// Interpret a response obtained outside of `RequestExecutor`.
pub fn interpret(response: &HttpResponse) -> ExecutionResult {
    match render_body(response) {
        Ok(output_text) => classify(response, output_text),
        Err(err) => err.into(),
    }
}

fn declares_json(response: &HttpResponse) -> bool {
    response
        .header("content-type")
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
}

/// Pretty-print declared JSON with two-space indentation; anything else is
/// passed through untouched. A top-level JSON string is shown unquoted.
fn render_body(response: &HttpResponse) -> Result<String, RequestError> {
    if !declares_json(response) {
        return Ok(response.body.clone());
    }
    let mut value: Value =
        serde_json::from_str(&response.body).map_err(|e| RequestError::Decode(e.to_string()))?;
    normalize_numbers(&mut value);
    match value {
        Value::String(s) => Ok(s),
        other => serde_json::to_string_pretty(&other).map_err(|e| RequestError::Decode(e.to_string())),
    }
}

/// Largest magnitude below which every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Print integral floats as integers (`1.0` as `1`), the way JavaScript
/// serializes numbers.
fn normalize_numbers(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER {
                    *n = (f as i64).into();
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_numbers),
        Value::Object(map) => map.values_mut().for_each(normalize_numbers),
        _ => {}
    }
}

fn classify(response: &HttpResponse, output_text: String) -> ExecutionResult {
    if response.is_ok() {
        ExecutionResult {
            outcome: Outcome::Success,
            output_text,
            message: SUCCESS_MESSAGE.to_string(),
        }
    } else {
        ExecutionResult {
            outcome: Outcome::HttpError,
            output_text,
            message: format!("API error: {}", response.status_text),
        }
    }
}
