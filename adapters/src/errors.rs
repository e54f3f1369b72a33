//! Custom error types specific to the `adapters` crate.
//!
//! Every failure the gateway can report to a caller lives here: transport
//! failures (the server could not be reached), non-2xx responses (with the
//! decoded body so callers can surface server-provided detail text), and
//! decoding failures when a response does not match the expected record.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    #[error("Invalid base address: {0}")]
    InvalidBaseUrl(String),

    #[error("Transport error on {path}: {reason}")]
    Transport { path: String, reason: String },

    #[error("Request to {path} failed with status {status}")]
    Status {
        path: String,
        status: u16,
        body: Value,
    },

    #[error("Failed to decode response from {path}: {reason}")]
    Decode { path: String, reason: String },
}

impl GatewayError {
    /// HTTP status of a rejected response, `None` for transport and decode failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided explanation, read from `detail` first and `message` second.
    ///
    /// Validation failures arrive as a list of `{"msg": ..}` entries and are
    /// joined with commas.
    pub fn detail(&self) -> Option<String> {
        let GatewayError::Status { body, .. } = self else {
            return None;
        };

        ["detail", "message"]
            .iter()
            .filter_map(|key| body.get(*key))
            .find_map(|value| match value {
                Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
                Value::Array(items) => {
                    let messages: Vec<&str> = items
                        .iter()
                        .filter_map(|item| item.get("msg").and_then(Value::as_str))
                        .collect();
                    (!messages.is_empty()).then(|| messages.join(", "))
                }
                _ => None,
            })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}
