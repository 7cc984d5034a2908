//! Terminal rendition of the task UI.
//!
//! The interface is an explicit state container with four fields and pure
//! transition functions; [`api::ApiClient`] drives the two HTTP calls. The
//! flow mirrors the browser page exactly: load on startup, submit then
//! re-fetch, no optimistic insert, no retry.

pub mod api;

use crate::task::Task;
use chrono::Local;
use std::fmt::Write;

/// UI state: the task list, the input text, and the loading/error flags.
/// Everything rendered is a pure function of these four fields.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub tasks: Vec<Task>,
    pub input: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl UiState {
    /// Fresh state; the UI starts in the loading state because the startup
    /// load fires immediately.
    pub fn new() -> Self {
        Self { loading: true, ..Self::default() }
    }

    /// A list request went out.
    pub fn load_started(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A list request resolved. Success replaces the whole task list;
    /// failure records the message. Either way loading clears.
    pub fn load_finished(&mut self, result: Result<Vec<Task>, String>) {
        match result {
            Ok(tasks) => self.tasks = tasks,
            Err(message) => self.error = Some(message),
        }
        self.loading = false;
    }

    /// A create request resolved. On success the input clears (the caller
    /// then re-runs the load cycle); on failure the input is kept so the
    /// user can retry.
    pub fn submit_finished(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => self.input.clear(),
            Err(message) => self.error = Some(message),
        }
    }

    /// Whether a submit would be a no-op (trimmed input empty).
    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// Render the list area: busy indicator, else error, else empty state,
    /// else one line per task in server order with a locale-formatted date.
    pub fn render(&self) -> String {
        if self.loading {
            return "Loading tasks...".to_owned();
        }
        if let Some(error) = &self.error {
            return format!("Error: {error}");
        }
        if self.tasks.is_empty() {
            return "No tasks yet. Add one above!".to_owned();
        }
        let mut out = String::new();
        for task in &self.tasks {
            let date = task.created_at.with_timezone(&Local).format("%x");
            writeln!(out, "- {}  ({date})", task.text).expect("write to String is infallible");
        }
        out
    }
}

/// Drive one full load cycle against the API.
pub async fn load_tasks(state: &mut UiState, client: &api::ApiClient) {
    state.load_started();
    state.load_finished(client.list_tasks().await);
}

/// Drive one submit: send the current input raw, then re-fetch on success.
/// A no-op when the trimmed input is empty.
pub async fn submit_task(state: &mut UiState, client: &api::ApiClient) {
    if !state.can_submit() {
        return;
    }
    let result = client.add_task(&state.input).await;
    let succeeded = result.is_ok();
    state.submit_finished(result);
    if succeeded {
        load_tasks(state, client).await;
    }
}
