//! Task record and input validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum raw length of task text, in characters.
pub const MAX_TEXT_LEN: usize = 255;

/// A persisted to-do item.
///
/// `id` and `created_at` are assigned by storage at insertion; no field is
/// ever mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Validation failure for task text. `Display` yields the exact message the
/// create endpoint returns to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextError {
    /// Missing, not a string, or empty after trimming.
    Required,
    /// More than [`MAX_TEXT_LEN`] characters before trimming.
    TooLong,
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextError::Required => {
                write!(f, "Task text is required and must be a non-empty string.")
            }
            TextError::TooLong => {
                write!(f, "Task text must be {} characters or less.", MAX_TEXT_LEN)
            }
        }
    }
}

impl std::error::Error for TextError {}

/// Check task text against the create rules.
///
/// Emptiness is judged on the trimmed value; the length cap is judged on the
/// raw, untrimmed value. The text stored on success is the raw input.
pub fn validate_text(text: Option<&str>) -> Result<&str, TextError> {
    let text = text.ok_or(TextError::Required)?;
    if text.trim().is_empty() {
        return Err(TextError::Required);
    }
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(TextError::TooLong);
    }
    Ok(text)
}
