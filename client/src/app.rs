//! The application facade: one gateway, one history, and page visits.
//!
//! `App::open` resolves a path to its route, mounts the owning shell and
//! follows the redirects the guard asks for until a page renders. Standalone
//! pages (NGO login and register, organization register) render without a
//! shell and without a session check.

use std::sync::Arc;

use mealmitra_adapters::{ApiClient, FixtureFallback};
use tracing::{info, instrument};

use crate::{
    api::{
        admin::AdminHandlers, donation::DonationHandlers, ngo::NgoHandlers, user::UserHandlers,
    },
    auth::{handlers::AuthForms, models::ShellKind, service::AuthService},
    config::ClientConfig,
    errors::ClientError,
    navigator::{History, Navigator},
    routes::{resolve, Page, ResolvedRoute},
    services::{
        navigation::Viewport,
        notice::Notice,
        shell::{RoleShell, ShellFrame, ShellView},
    },
};

/// Redirect hops followed by a single `open` before giving up.
pub const MAX_REDIRECTS: usize = 4;

pub enum Visit {
    /// A page outside every shell.
    Standalone(ResolvedRoute),
    Rendered {
        route: ResolvedRoute,
        frame: ShellFrame<Page>,
    },
}

impl Visit {
    pub fn route(&self) -> &ResolvedRoute {
        match self {
            Visit::Standalone(route) | Visit::Rendered { route, .. } => route,
        }
    }

    pub fn page(&self) -> Page {
        self.route().entry.page
    }

    pub fn frame(&self) -> Option<&ShellFrame<Page>> {
        match self {
            Visit::Rendered { frame, .. } => Some(frame),
            Visit::Standalone(_) => None,
        }
    }
}

pub struct App {
    client: ApiClient,
    history: Arc<History>,
    config: ClientConfig,
}

impl App {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut client = ApiClient::connect(&config.api_base_url)?;
        if config.fixtures {
            client = client.with_fallback(Arc::new(FixtureFallback::development()));
        }

        Ok(Self::with_client(client, config))
    }

    /// Builds an app over an existing gateway, e.g. one backed by a scripted transport.
    pub fn with_client(client: ApiClient, config: ClientConfig) -> Self {
        Self {
            client,
            history: Arc::new(History::new()),
            config,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn navigator(&self) -> Arc<dyn Navigator> {
        self.history.clone()
    }

    pub fn viewport(&self, width: u32) -> Viewport {
        Viewport::new(width).with_breakpoint(self.config.wide_viewport_px)
    }

    pub fn shell(&self, kind: ShellKind) -> RoleShell {
        RoleShell::new(kind, self.client.clone(), self.navigator())
    }

    pub fn auth_forms(&self) -> AuthForms {
        AuthForms::new(AuthService::new(self.client.clone()), self.navigator())
    }

    pub fn donations(&self) -> DonationHandlers {
        DonationHandlers::new(self.client.clone())
    }

    pub fn admin(&self) -> AdminHandlers {
        AdminHandlers::new(self.client.clone())
    }

    pub fn ngo(&self) -> NgoHandlers {
        NgoHandlers::new(self.client.clone())
    }

    pub fn user(&self) -> UserHandlers {
        UserHandlers::new(self.client.clone())
    }

    /// Opens `path` and follows guard redirects until a page renders.
    #[instrument(skip(self))]
    pub async fn open(&self, path: &str) -> Result<Visit, ClientError> {
        self.history.navigate(path);
        let mut target = path.to_string();

        for _ in 0..=MAX_REDIRECTS {
            let route = resolve(&target);

            let Some(kind) = route.entry.shell else {
                info!("{} renders standalone", route.path);
                return Ok(Visit::Standalone(route));
            };

            let page = route.entry.page;
            match self.shell(kind).enter(|_, _| page).await {
                ShellView::Ready(frame) => return Ok(Visit::Rendered { route, frame }),
                // The shell already recorded the hop in the history.
                ShellView::Redirected(to) => target = to,
            }
        }

        Err(ClientError::RedirectLoop(path.to_string()))
    }

    pub async fn logout(&self) -> Notice {
        self.shell(ShellKind::Public).logout().await
    }
}
