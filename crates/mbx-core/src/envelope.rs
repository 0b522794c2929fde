//! Backend response envelope.
//!
//! The backend wraps successful payloads as `{"data": ...}` and failures as
//! `{"error": "..."}` or `{"message": "..."}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Wrap a payload the way the backend does.
    pub const fn of(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// The backend-provided failure message, preferring `error` over `message`.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}
