//! Error types for the request executor.
//!
//! # Design
//! Every variant is a client-side failure: either the user's input was
//! rejected before anything reached the network, or the round-trip itself
//! broke. Non-2xx responses are not errors here; they are interpreted into an
//! `HttpError` outcome with the body intact. `Display` renders the exact
//! message shown to the user.

use std::fmt;

/// Message substituted when a failure carries no description.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Failure reported by a `Transport` when no HTTP response was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportError {}

/// Errors that short-circuit an execution into a `ClientError` outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The URL was empty or whitespace.
    EmptyUrl,

    /// The body text of a non-GET request is not valid JSON.
    InvalidBody(String),

    /// The headers text is not valid JSON or not a JSON object.
    InvalidHeaders(String),

    /// The transport could not complete the round-trip.
    Transport(TransportError),

    /// The response declared JSON but its body did not decode.
    Decode(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::EmptyUrl => write!(f, "API URL is required!"),
            RequestError::InvalidBody(_) => write!(f, "Invalid JSON format in Fetch Data."),
            RequestError::InvalidHeaders(msg) => write!(f, "Invalid Headers JSON: {msg}"),
            RequestError::Transport(err) => request_failed(f, &err.message),
            RequestError::Decode(msg) => request_failed(f, msg),
        }
    }
}

fn request_failed(f: &mut fmt::Formatter<'_>, msg: &str) -> fmt::Result {
    if msg.is_empty() {
        write!(f, "Request failed: {UNKNOWN_ERROR}")
    } else {
        write!(f, "Request failed: {msg}")
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for RequestError {
    fn from(err: TransportError) -> Self {
        RequestError::Transport(err)
    }
}
