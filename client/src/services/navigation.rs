//! Static side-navigation menus and the collapsible sidebar state.
//!
//! Menus are fixed per role family. The sidebar is always visible on wide
//! viewports; on narrow ones it is a drawer the user toggles, and following a
//! link closes it. None of this state is persisted.

use serde::Serialize;

use crate::auth::{
    models::ShellKind,
    routes::{ADMIN_DASHBOARD, NGO_DASHBOARD, ORG_DASHBOARD, USER_DASHBOARD},
};

/// Viewports at least this wide keep the sidebar pinned open.
pub const DEFAULT_WIDE_VIEWPORT_PX: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Icon {
    Home,
    Heart,
    HandHeart,
    HelpCircle,
    LayoutDashboard,
    Users,
    Search,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub label: &'static str,
    pub destination: &'static str,
    pub icon: Icon,
}

const fn entry(label: &'static str, destination: &'static str, icon: Icon) -> NavEntry {
    NavEntry {
        label,
        destination,
        icon,
    }
}

static INDIVIDUAL_MENU: [NavEntry; 4] = [
    entry("Dashboard", USER_DASHBOARD, Icon::Home),
    entry("Donate Food", "/donate", Icon::Heart),
    entry("Claim Food", "/claim-food", Icon::HandHeart),
    entry("My Donation", "/my-donations", Icon::Heart),
];

static INDIVIDUAL_FOOTER: [NavEntry; 1] = [entry("Help & Support", "/help-support", Icon::HelpCircle)];

static NO_FOOTER: [NavEntry; 0] = [];

static ADMIN_MENU: [NavEntry; 3] = [
    entry("Dashboard", ADMIN_DASHBOARD, Icon::LayoutDashboard),
    entry("Donations", "/admin/donations", Icon::Heart),
    entry("Users", "/admin/users", Icon::Users),
];

static NGO_MENU: [NavEntry; 4] = [
    entry("Dashboard", NGO_DASHBOARD, Icon::LayoutDashboard),
    entry("Claim Food", "/ngo/claim", Icon::Search),
    entry("My Claims", "/ngo/donations", Icon::Heart),
    entry("Profile", "/ngo/profile", Icon::User),
];

static ORGANIZATION_MENU: [NavEntry; 3] = [
    entry("Dashboard", ORG_DASHBOARD, Icon::LayoutDashboard),
    entry("Donate Food", "/donate", Icon::Heart),
    entry("My Donations", "/my-donations", Icon::Heart),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SideNav {
    pub entries: &'static [NavEntry],
    pub footer: &'static [NavEntry],
}

impl SideNav {
    pub fn for_shell(shell: ShellKind) -> Option<SideNav> {
        let (entries, footer): (&'static [NavEntry], &'static [NavEntry]) = match shell {
            ShellKind::Public => return None,
            ShellKind::Individual => (&INDIVIDUAL_MENU[..], &INDIVIDUAL_FOOTER[..]),
            ShellKind::Admin => (&ADMIN_MENU[..], &NO_FOOTER[..]),
            ShellKind::Ngo => (&NGO_MENU[..], &NO_FOOTER[..]),
            ShellKind::Organization => (&ORGANIZATION_MENU[..], &NO_FOOTER[..]),
        };
        Some(SideNav { entries, footer })
    }

    /// The entry highlighted for `current_path`, matched exactly.
    pub fn active(&self, current_path: &str) -> Option<&'static NavEntry> {
        self.entries
            .iter()
            .chain(self.footer.iter())
            .find(|entry| entry.destination == current_path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub wide_from: u32,
}

impl Viewport {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            wide_from: DEFAULT_WIDE_VIEWPORT_PX,
        }
    }

    pub fn with_breakpoint(mut self, wide_from: u32) -> Self {
        self.wide_from = wide_from;
        self
    }

    pub fn is_wide(&self) -> bool {
        self.width >= self.wide_from
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SidebarState {
    open: bool,
}

impl SidebarState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_visible(&self, viewport: Viewport) -> bool {
        viewport.is_wide() || self.open
    }

    /// Following a link collapses the drawer on narrow screens.
    pub fn follow_link(&mut self, viewport: Viewport) {
        if !viewport.is_wide() {
            self.close();
        }
    }
}
