//! Thin reqwest client over the two endpoints.
//!
//! All failures — transport errors and non-2xx responses alike — normalize
//! to a single displayable message, the way the browser page treats them.
//! Non-2xx bodies contribute their `error` field when present.

use crate::task::Task;
use serde::Deserialize;

#[derive(Deserialize)]
struct TasksPayload {
    tasks: Vec<Task>,
}

#[derive(Deserialize)]
struct ErrorPayload {
    error: Option<String>,
}

/// HTTP client bound to one server base URL.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            http: reqwest::Client::new(),
        }
    }

    /// `GET /api/getTasks`, in server order.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, String> {
        let response = self
            .http
            .get(format!("{}/api/getTasks", self.base_url))
            .send()
            .await
            .map_err(|err| err.to_string())?;

        if !response.status().is_success() {
            return Err(error_message(response, "Failed to fetch tasks").await);
        }
        let payload: TasksPayload = response.json().await.map_err(|err| err.to_string())?;
        Ok(payload.tasks)
    }

    /// `POST /api/addTask` with the raw text.
    pub async fn add_task(&self, text: &str) -> Result<(), String> {
        let response = self
            .http
            .post(format!("{}/api/addTask", self.base_url))
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|err| err.to_string())?;

        if !response.status().is_success() {
            return Err(error_message(response, "Failed to add task").await);
        }
        Ok(())
    }
}

/// Prefer the body's `error` field, fall back to a generic message.
async fn error_message(response: reqwest::Response, fallback: &str) -> String {
    match response.json::<ErrorPayload>().await {
        Ok(ErrorPayload { error: Some(message) }) => message,
        _ => fallback.to_owned(),
    }
}
