//! Identity label shown in a shell's top bar.
//!
//! The label is fetched on its own, separately from the guard's probe, and a
//! failed fetch never blocks the shell: it degrades to a per-shell placeholder.

use mealmitra_adapters::ApiClient;
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::auth::{
    models::ShellKind,
    routes::{ADMIN_DASHBOARD, NGO_DASHBOARD, ORG_DASHBOARD, ROOT},
};

pub const BRAND: &str = "Meal-Mitra";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IdentityLabel {
    Resolved(String),
    Placeholder(&'static str),
}

impl IdentityLabel {
    pub fn text(&self) -> &str {
        match self {
            IdentityLabel::Resolved(name) => name,
            IdentityLabel::Placeholder(text) => text,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, IdentityLabel::Placeholder(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IdentitySource {
    path: &'static str,
    pointer: &'static str,
    placeholder: &'static str,
}

fn source_for(shell: ShellKind) -> IdentitySource {
    match shell {
        ShellKind::Public | ShellKind::Individual => IdentitySource {
            path: "/me",
            pointer: "/username",
            placeholder: "Guest",
        },
        ShellKind::Admin => IdentitySource {
            path: "/profile",
            pointer: "/user/username",
            placeholder: "Admin",
        },
        ShellKind::Organization => IdentitySource {
            path: "/profile",
            pointer: "/user/username",
            placeholder: "Organization",
        },
        ShellKind::Ngo => IdentitySource {
            path: "/ngo/profile",
            pointer: "/name",
            placeholder: "Partner",
        },
    }
}

/// Where the brand mark links to.
pub fn brand_link(shell: ShellKind) -> &'static str {
    match shell {
        ShellKind::Public | ShellKind::Individual => ROOT,
        ShellKind::Admin => ADMIN_DASHBOARD,
        ShellKind::Organization => ORG_DASHBOARD,
        ShellKind::Ngo => NGO_DASHBOARD,
    }
}

/// An identity lookup running in the background.
///
/// The shell shows the placeholder until the lookup lands; nothing waits on it.
#[derive(Debug, Clone)]
pub struct IdentityMount {
    label: watch::Receiver<Option<IdentityLabel>>,
    placeholder: &'static str,
}

impl IdentityMount {
    pub fn spawn(client: ApiClient, shell: ShellKind) -> Self {
        let (tx, rx) = watch::channel(None);

        tokio::spawn(async move {
            let label = load_identity(&client, shell).await;
            // Nobody may be watching any more; the label is then dropped.
            let _ = tx.send(Some(label));
        });

        Self {
            label: rx,
            placeholder: source_for(shell).placeholder,
        }
    }

    /// The label to show right now.
    pub fn current(&self) -> IdentityLabel {
        self.label
            .borrow()
            .clone()
            .unwrap_or(IdentityLabel::Placeholder(self.placeholder))
    }

    pub fn is_resolved(&self) -> bool {
        self.label.borrow().is_some()
    }

    /// Waits for the lookup to land.
    pub async fn resolved(&self) -> IdentityLabel {
        let mut label = self.label.clone();
        let landed = match label.wait_for(Option::is_some).await {
            Ok(landed) => (*landed).clone(),
            // The lookup task died without reporting.
            Err(_) => None,
        };
        landed.unwrap_or(IdentityLabel::Placeholder(self.placeholder))
    }
}

#[derive(Debug, Clone)]
pub struct TopBar {
    pub brand: &'static str,
    pub brand_link: &'static str,
    pub identity: IdentityMount,
    /// Only shells with a sidebar get the menu toggle.
    pub has_menu_toggle: bool,
}

pub async fn load_identity(client: &ApiClient, shell: ShellKind) -> IdentityLabel {
    let source = source_for(shell);

    match client.get(source.path).await {
        Ok(response) => match response.body.pointer(source.pointer).and_then(|v| v.as_str()) {
            Some(name) if !name.is_empty() => IdentityLabel::Resolved(name.to_string()),
            _ => IdentityLabel::Placeholder(source.placeholder),
        },
        Err(err) => {
            debug!("identity lookup for {shell} shell failed: {err}");
            IdentityLabel::Placeholder(source.placeholder)
        }
    }
}

/// Starts the identity lookup and returns the bar at once.
pub fn mount_top_bar(client: &ApiClient, shell: ShellKind) -> TopBar {
    TopBar {
        brand: BRAND,
        brand_link: brand_link(shell),
        identity: IdentityMount::spawn(client.clone(), shell),
        has_menu_toggle: shell != ShellKind::Public,
    }
}
