//! Where navigation requests go.
//!
//! Shells and flows never switch pages themselves; they ask a [`Navigator`].
//! [`History`] is the in-process implementation: it keeps the visited paths in
//! order, which is all the CLI and the tests need to observe redirects.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<String>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(path: &str) -> Self {
        Self {
            entries: Mutex::new(vec![path.to_string()]),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for History {
    fn navigate(&self, path: &str) {
        debug!("navigate -> {path}");
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_records_in_order() {
        let history = History::starting_at("/admin-dashboard");
        history.navigate("/user/dashboard");
        assert_eq!(history.current().as_deref(), Some("/user/dashboard"));
        assert_eq!(history.entries(), vec!["/admin-dashboard", "/user/dashboard"]);
    }
}
