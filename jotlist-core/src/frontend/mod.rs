//! Embedded browser UI, served memory-first.
//!
//! The page is compiled into the binary with `include_str!`; there is no
//! disk lookup at runtime. The page itself holds the task list, input text
//! and loading/error flags in memory and drives the two API calls.

use crate::http::{body_from, not_found_response, Resp};
use http::header::{CACHE_CONTROL, CONTENT_TYPE};
use http::StatusCode;
use hyper::Response;

const INDEX_HTML: &str = include_str!("index.html");

/// Serve an embedded asset for a GET request path.
pub fn serve_asset(path: &str) -> Resp {
    match path {
        "/" | "/index.html" => html_response(INDEX_HTML),
        _ => not_found_response("asset"),
    }
}

fn html_response(content: &'static str) -> Resp {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .header(CACHE_CONTROL, "no-cache")
        .body(body_from(content))
        .expect("valid HTTP response")
}
