//! Custom error types specific to authentication flows.
//!
//! Explicit login and registration attempts surface their failures to the user
//! as notices, so every variant can produce the text to show: the server's own
//! explanation when it sent one, otherwise the flow's generic message.

use mealmitra_adapters::GatewayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{flow} rejected: {source}")]
    Rejected {
        flow: &'static str,
        #[source]
        source: GatewayError,
    },

    #[error("Signed in, but the profile could not be loaded: {0}")]
    ProfileUnavailable(#[source] GatewayError),

    #[error("Missing required field `{0}`")]
    MissingField(&'static str),

    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl AuthError {
    pub fn rejected(flow: &'static str) -> impl FnOnce(GatewayError) -> AuthError {
        move |source| AuthError::Rejected { flow, source }
    }

    /// Text for the notice shown to the user.
    pub fn user_message(&self, generic: &str) -> String {
        match self {
            AuthError::Rejected { source, .. } | AuthError::ProfileUnavailable(source) => {
                source.detail().unwrap_or_else(|| generic.to_string())
            }
            AuthError::MissingField(field) => format!("Please fill in {field}"),
            AuthError::PasswordMismatch => self.to_string(),
        }
    }
}
