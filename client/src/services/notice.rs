//! User-visible notices for the outcome of an explicit action.
//!
//! Mutations (submits, claims, deletes, promotions) report through a notice:
//! the server's own explanation when the rejection carried one, otherwise a
//! generic message chosen by the caller.

use std::fmt;

use mealmitra_adapters::GatewayError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn from_failure(err: &GatewayError, generic: &str) -> Self {
        Self::error(err.detail().unwrap_or_else(|| generic.to_string()))
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Success => write!(f, "[ok] {}", self.message),
            NoticeLevel::Error => write!(f, "[error] {}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_detail_wins_over_generic_text() {
        let err = GatewayError::Status {
            path: "/donations/4/claim".to_string(),
            status: 409,
            body: json!({"detail": "Donation already claimed"}),
        };
        let notice = Notice::from_failure(&err, "Failed to claim donation");
        assert!(notice.is_error());
        assert_eq!(notice.message, "Donation already claimed");
    }

    #[test]
    fn generic_text_covers_bare_failures() {
        let err = GatewayError::Transport {
            path: "/donations/4/claim".to_string(),
            reason: "timed out".to_string(),
        };
        let notice = Notice::from_failure(&err, "Failed to claim donation");
        assert_eq!(notice.to_string(), "[error] Failed to claim donation");
    }
}
