//! HTTP plumbing shared by the server and the endpoint handlers.
//!
//! Type aliases and response helpers for the hyper stack, plus the
//! structured JSON access log line emitted once per request.

pub mod api;
pub mod server;

use bytes::Bytes;
use http::header::{ALLOW, CONTENT_TYPE};
use http::{Method, StatusCode};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response};
use std::convert::Infallible;

/// Common HTTP type aliases used across the crate.
pub type RespBody = BoxBody<Bytes, Infallible>;
pub type Req = Request<hyper::body::Incoming>;
pub type Resp = Response<RespBody>;

/// Create a response body from any data that can be converted to Bytes.
pub fn body_from<T: Into<Bytes>>(data: T) -> RespBody {
    Full::new(data.into()).boxed()
}

/// Build a JSON response with the given status.
pub fn json_response(status: StatusCode, body: serde_json::Value) -> Resp {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(body_from(body.to_string()))
        .expect("valid HTTP response")
}

/// Build a `{ "error": message }` response with the given status.
pub fn error_response(status: StatusCode, message: &str) -> Resp {
    json_response(status, serde_json::json!({ "error": message }))
}

/// 405 Method Not Allowed, exposing the designated verb in an `Allow` header.
pub fn method_not_allowed_response(allowed: &Method) -> Resp {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(CONTENT_TYPE, "application/json")
        .header(ALLOW, allowed.as_str())
        .body(body_from(
            serde_json::json!({ "error": "Method Not Allowed" }).to_string(),
        ))
        .expect("valid HTTP response")
}

/// Standard 404 Not Found JSON response.
pub fn not_found_response(resource: &str) -> Resp {
    error_response(StatusCode::NOT_FOUND, &format!("{resource} not found"))
}

/// 500 Internal Server Error carrying the underlying failure text.
///
/// The `details` field exposes the storage error verbatim; see the crate
/// docs for why this is kept.
pub fn storage_error_response(details: &str) -> Resp {
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        serde_json::json!({ "error": "Internal Server Error", "details": details }),
    )
}

/// Log one HTTP access entry as structured JSON.
pub fn log_access(
    remote: Option<std::net::SocketAddr>,
    method: &str,
    path: &str,
    resp: &Resp,
    start: std::time::Instant,
) {
    let entry = serde_json::json!({
        "remote": remote.map(|r| r.ip().to_string()).unwrap_or_else(|| "-".into()),
        "method": method,
        "path": path,
        "status": resp.status().as_u16(),
        "dur_ms": start.elapsed().as_millis() as u64,
    });
    log::info!("{entry}");
}
