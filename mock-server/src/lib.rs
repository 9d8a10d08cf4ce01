use std::collections::BTreeMap;

use axum::{
    extract::{Path, Request},
    http::{header, HeaderMap, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Upper bound for `/large/{bytes}`.
pub const MAX_LARGE_BYTES: usize = 64 * 1024 * 1024;

/// What `/echo` saw of the incoming request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/text", get(text))
        .route("/missing", get(missing))
        .route("/broken-json", get(broken_json))
        .route("/status/{code}", get(status))
        .route("/large/{bytes}", get(large))
        .layer(middleware::from_fn(log_request))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    info!("{method} {uri} -> {}", response.status().as_u16());
    response
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = serde_json::from_str(&body).ok();
    Json(Echo {
        method: method.to_string(),
        headers,
        body,
    })
}

async fn text() -> &'static str {
    "hello"
}

async fn missing() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

async fn broken_json() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], "{\"unterminated\": ")
}

/// `bytes` of plain text, for exercising client-side body limits.
async fn large(Path(bytes): Path<usize>) -> Result<String, StatusCode> {
    if bytes > MAX_LARGE_BYTES {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok("x".repeat(bytes))
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, Json(json!({ "status": code }))))
}
