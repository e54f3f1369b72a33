//! Role shells: a session guard, the persistent chrome, and one content slot.
//!
//! A shell mounts its guard and shows nothing but a loading state until the
//! guard settles. Authorized mounts get a top bar, the role's side navigation
//! and the rendered content; every other outcome becomes a navigation request.
//! The content closure runs only on the authorized path.

use std::sync::{Arc, Mutex, PoisonError};

use mealmitra_adapters::ApiClient;
use serde::Serialize;
use tracing::warn;

use crate::{
    auth::{
        middleware::{GuardMount, GuardState, SessionGuard},
        models::{policy_for, RoleClaim, ShellKind},
        routes::ROOT,
        service::AuthService,
    },
    navigator::Navigator,
    services::{
        identity::{mount_top_bar, TopBar},
        navigation::{SideNav, SidebarState},
        notice::Notice,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthTab {
    Login,
    Register,
}

/// The authentication dialog owned by shells that host unauthenticated entry points.
#[derive(Debug, Default)]
pub struct AuthDialog {
    requested: Mutex<Option<AuthTab>>,
}

impl AuthDialog {
    pub(crate) fn open(&self, tab: AuthTab) {
        *self.requested.lock().unwrap_or_else(PoisonError::into_inner) = Some(tab);
    }

    pub fn close(&self) {
        *self.requested.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The tab the dialog is open on, `None` while closed.
    pub fn requested(&self) -> Option<AuthTab> {
        *self.requested.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

type OpenAuth = Arc<dyn Fn(AuthTab) + Send + Sync>;

/// Read-only value handed from a shell to the content it hosts.
#[derive(Clone)]
pub struct ShellContext {
    shell: ShellKind,
    open_auth: Option<OpenAuth>,
}

impl ShellContext {
    pub fn shell(&self) -> ShellKind {
        self.shell
    }

    pub fn can_open_auth(&self) -> bool {
        self.open_auth.is_some()
    }

    /// Asks the hosting shell to open its auth dialog. Returns `false` when the shell has none.
    pub fn open_auth(&self, tab: AuthTab) -> bool {
        match &self.open_auth {
            Some(open) => {
                open(tab);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShellPhase {
    Loading,
    Authorized,
    Redirecting,
}

pub struct ShellFrame<V> {
    pub top_bar: TopBar,
    pub side_nav: Option<SideNav>,
    pub sidebar: SidebarState,
    pub claim: RoleClaim,
    pub content: V,
}

pub enum ShellView<V> {
    Ready(ShellFrame<V>),
    Redirected(String),
}

impl<V> ShellView<V> {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            ShellView::Redirected(to) => Some(to),
            ShellView::Ready(_) => None,
        }
    }
}

pub struct RoleShell {
    kind: ShellKind,
    client: ApiClient,
    guard: SessionGuard,
    navigator: Arc<dyn Navigator>,
    auth_dialog: Option<Arc<AuthDialog>>,
}

impl RoleShell {
    pub fn new(kind: ShellKind, client: ApiClient, navigator: Arc<dyn Navigator>) -> Self {
        let auth_dialog = (kind == ShellKind::Public).then(|| Arc::new(AuthDialog::default()));

        Self {
            kind,
            guard: SessionGuard::new(client.clone(), policy_for(kind)),
            client,
            navigator,
            auth_dialog,
        }
    }

    pub fn kind(&self) -> ShellKind {
        self.kind
    }

    pub fn auth_dialog(&self) -> Option<&AuthDialog> {
        self.auth_dialog.as_deref()
    }

    pub fn context(&self) -> ShellContext {
        let open_auth = self.auth_dialog.clone().map(|dialog| {
            let open: OpenAuth = Arc::new(move |tab: AuthTab| dialog.open(tab));
            open
        });

        ShellContext {
            shell: self.kind,
            open_auth,
        }
    }

    /// Starts a fresh session check and the identity lookup. Every call probes again.
    pub fn mount(&self) -> ShellMount<'_> {
        ShellMount {
            shell: self,
            guard: self.guard.mount(),
            top_bar: mount_top_bar(&self.client, self.kind),
        }
    }

    pub async fn enter<V, F>(&self, render: F) -> ShellView<V>
    where
        F: FnOnce(&ShellContext, &RoleClaim) -> V,
    {
        self.mount().render(render).await
    }

    /// Ends the session and always lands on the public root, whatever the server said.
    pub async fn logout(&self) -> Notice {
        let notice = match AuthService::new(self.client.clone()).logout().await {
            Ok(_) => Notice::success("Logged out successfully"),
            Err(err) => {
                warn!("logout call failed: {err}");
                Notice::error("Logout request failed")
            }
        };

        self.navigator.navigate(ROOT);
        notice
    }
}

pub struct ShellMount<'a> {
    shell: &'a RoleShell,
    guard: GuardMount,
    top_bar: TopBar,
}

impl ShellMount<'_> {
    pub fn phase(&self) -> ShellPhase {
        match self.guard.state() {
            GuardState::Checking => ShellPhase::Loading,
            GuardState::Authorized(_) => ShellPhase::Authorized,
            GuardState::Redirecting(_) => ShellPhase::Redirecting,
        }
    }

    /// Waits for the guard, then renders or redirects. The identity label is not awaited.
    pub async fn render<V, F>(self, render: F) -> ShellView<V>
    where
        F: FnOnce(&ShellContext, &RoleClaim) -> V,
    {
        let shell = self.shell;

        let destination = match self.guard.settled().await {
            GuardState::Authorized(claim) => {
                let content = render(&shell.context(), &claim);

                return ShellView::Ready(ShellFrame {
                    top_bar: self.top_bar,
                    side_nav: SideNav::for_shell(shell.kind),
                    sidebar: SidebarState::default(),
                    claim,
                    content,
                });
            }
            GuardState::Redirecting(to) => to,
            GuardState::Checking => shell.guard.policy().login_entry.to_string(),
        };

        shell.navigator.navigate(&destination);
        ShellView::Redirected(destination)
    }
}
