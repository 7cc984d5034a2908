//! The two JSON endpoints: list every task and create one task.
//!
//! Each handler is stateless per invocation; the only shared state is the
//! [`TaskStore`] connection, and every storage call runs on the blocking
//! thread pool. Validation is checked before storage is touched; storage
//! failures are logged here and surfaced as 500 with a `details` string.

use super::{
    error_response, json_response, method_not_allowed_response, storage_error_response, Req, Resp,
};
use crate::store::TaskStore;
use crate::task::{validate_text, TextError};
use http::{Method, StatusCode};
use http_body_util::BodyExt;
use std::sync::Arc;

/// `GET /api/getTasks` - every row, ordered newest-first.
pub async fn get_tasks(req: Req, store: Arc<TaskStore>) -> Resp {
    if req.method() != Method::GET {
        return method_not_allowed_response(&Method::GET);
    }

    match tokio::task::spawn_blocking(move || store.list_tasks()).await {
        Ok(Ok(tasks)) => json_response(StatusCode::OK, serde_json::json!({ "tasks": tasks })),
        Ok(Err(err)) => {
            log::error!("database error on getTasks: {err}");
            storage_error_response(&err.to_string())
        }
        Err(err) => {
            log::error!("blocking task failed on getTasks: {err}");
            storage_error_response(&err.to_string())
        }
    }
}

/// `POST /api/addTask` - validate `{ "text": string }` and insert one row.
pub async fn add_task(req: Req, store: Arc<TaskStore>) -> Resp {
    if req.method() != Method::POST {
        return method_not_allowed_response(&Method::POST);
    }

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            log::debug!("failed to read addTask body: {err}");
            return error_response(StatusCode::BAD_REQUEST, &TextError::Required.to_string());
        }
    };

    // An unparseable body and a missing/non-string `text` field are the same
    // validation failure to the caller.
    let payload: serde_json::Value =
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    let text = match validate_text(payload.get("text").and_then(|v| v.as_str())) {
        Ok(text) => text.to_owned(),
        Err(err) => return error_response(StatusCode::BAD_REQUEST, &err.to_string()),
    };

    match tokio::task::spawn_blocking(move || store.insert_task(&text)).await {
        Ok(Ok(id)) => {
            log::debug!("task {id} created");
            json_response(
                StatusCode::CREATED,
                serde_json::json!({ "message": "Task added successfully" }),
            )
        }
        Ok(Err(err)) => {
            log::error!("database error on addTask: {err}");
            storage_error_response(&err.to_string())
        }
        Err(err) => {
            log::error!("blocking task failed on addTask: {err}");
            storage_error_response(&err.to_string())
        }
    }
}
