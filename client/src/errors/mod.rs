//! Global application error types.
//!
//! `ClientError` is what the binary and the `App` facade return. Page and
//! auth handlers keep their narrower errors and convert into this one at the
//! edge.

use mealmitra_adapters::GatewayError;
use thiserror::Error;

use crate::{auth::errors::AuthError, services::notice::Notice};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Too many redirects while opening {0}")]
    RedirectLoop(String),
}

impl ClientError {
    /// Converts the failure into a user-facing notice, preferring the server's own text.
    pub fn notice(&self, generic: &str) -> Notice {
        match self {
            ClientError::Gateway(err) => Notice::from_failure(err, generic),
            ClientError::Auth(err) => Notice::error(err.user_message(generic)),
            ClientError::Config(_) | ClientError::RedirectLoop(_) => Notice::error(generic),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn gateway_detail_wins_over_generic_text() {
        let err = ClientError::from(GatewayError::Status {
            path: "/donations".into(),
            status: 400,
            body: json!({"detail": "Text is required"}),
        });

        assert_eq!(err.notice("Failed to submit").message, "Text is required");
    }

    #[test]
    fn config_errors_use_the_generic_text() {
        let err = ClientError::Config("MEALMITRA_API_BASE: bad".into());
        assert_eq!(err.notice("Could not start").message, "Could not start");
    }
}
