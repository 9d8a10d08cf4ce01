//! Request executor core for the Apixer API tester.
//!
//! # Overview
//! Validates a user-entered request (URL, method, headers JSON, body JSON),
//! sends it through a pluggable `Transport`, and turns the response into a
//! display-ready `ExecutionResult`. Every failure comes back as a result
//! value; nothing panics or returns `Err` to the UI.
//!
//! # Design
//! - `resolve` (build) and `interpret` (parse) are pure, so the I/O boundary
//!   is explicit and hosts can perform the round-trip themselves.
//! - `RequestExecutor` is stateless apart from the transport it wraps.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.

pub mod error;
pub mod executor;
pub mod http;
pub mod transport;
pub mod types;

pub use error::{RequestError, TransportError};
pub use executor::{interpret, merge_headers, resolve, RequestExecutor};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ParseMethodError};
pub use transport::{Transport, UreqTransport};
pub use types::{ExecutionResult, Outcome, RequestSpec, ResolvedRequest};
