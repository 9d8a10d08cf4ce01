//! Request and result types exchanged with the UI layer.
//!
//! # Design
//! `RequestSpec` is raw user input: the headers and body are kept as the text
//! the user typed so that parse failures can be reported against it.
//! `ResolvedRequest` only exists once that text has been validated.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RequestError;
use crate::http::{HttpMethod, HttpRequest};

/// Header sent on every request unless the user overrides it.
pub const DEFAULT_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// What the user asked for, exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    pub url: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub headers_text: String,
    #[serde(default)]
    pub body_text: String,
}

impl RequestSpec {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers_text: String::new(),
            body_text: String::new(),
        }
    }

    pub fn with_headers(mut self, headers_text: impl Into<String>) -> Self {
        self.headers_text = headers_text.into();
        self
    }

    pub fn with_body(mut self, body_text: impl Into<String>) -> Self {
        self.body_text = body_text.into();
        self
    }
}

/// A validated request: merged headers and, for non-GET, a parsed body.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ResolvedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Serialize into wire form. The body is emitted as compact JSON.
    pub fn to_http_request(&self) -> Result<HttpRequest, RequestError> {
        let body = match &self.body {
            Some(value) if self.method.sends_body() => Some(
                serde_json::to_string(value).map_err(|e| RequestError::InvalidBody(e.to_string()))?,
            ),
            _ => None,
        };
        Ok(HttpRequest {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body,
        })
    }
}

/// How an execution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// 2xx response.
    Success,
    /// The server answered with a non-2xx status.
    HttpError,
    /// Rejected input, transport failure, or undecodable response.
    ClientError,
}

/// Everything the UI needs to render one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub outcome: Outcome,
    pub output_text: String,
    pub message: String,
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

impl From<RequestError> for ExecutionResult {
    fn from(err: RequestError) -> Self {
        ExecutionResult {
            outcome: Outcome::ClientError,
            output_text: String::new(),
            message: err.to_string(),
        }
    }
}
