//! The closed list of page routes and the shell each one lives in.
//!
//! Paths are part of the public surface (bookmarks, links in emails) and are
//! kept exactly as published. Resolution strips the query string and a
//! trailing slash, binds `:param` segments, and falls back to the public
//! not-found page.

use serde::Serialize;

use crate::auth::models::ShellKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Page {
    Home,
    Register,
    ForgotPassword,
    ResetPassword,
    About,
    HowItWorks,
    Impact,
    HelpSupport,
    ClaimFood,
    Login,
    NotFound,
    NgoLogin,
    NgoRegister,
    OrgRegister,
    UserDashboard,
    Donate,
    Profile,
    MyDonations,
    AdminDashboard,
    AdminProfile,
    AdminDonations,
    AdminDonationDetail,
    AdminUsers,
    VerifyNgo,
    VerifyOrganization,
    AdminDeleteDonations,
    NgoDashboard,
    NgoProfile,
    OrgDashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub pattern: &'static str,
    /// `None` for stand-alone pages rendered without any shell.
    pub shell: Option<ShellKind>,
    pub page: Page,
}

const fn route(pattern: &'static str, shell: Option<ShellKind>, page: Page) -> RouteEntry {
    RouteEntry {
        pattern,
        shell,
        page,
    }
}

const PUBLIC: Option<ShellKind> = Some(ShellKind::Public);
const INDIVIDUAL: Option<ShellKind> = Some(ShellKind::Individual);
const ADMIN: Option<ShellKind> = Some(ShellKind::Admin);
const NGO: Option<ShellKind> = Some(ShellKind::Ngo);
const ORGANIZATION: Option<ShellKind> = Some(ShellKind::Organization);

pub static ROUTES: [RouteEntry; 28] = [
    route("/", PUBLIC, Page::Home),
    route("/register", PUBLIC, Page::Register),
    route("/forgot-password", PUBLIC, Page::ForgotPassword),
    route("/reset-password", PUBLIC, Page::ResetPassword),
    route("/about", PUBLIC, Page::About),
    route("/how-it-works", PUBLIC, Page::HowItWorks),
    route("/impact", PUBLIC, Page::Impact),
    route("/help-support", PUBLIC, Page::HelpSupport),
    route("/claim-food", PUBLIC, Page::ClaimFood),
    route("/login", PUBLIC, Page::Login),
    route("/ngo/login", None, Page::NgoLogin),
    route("/ngo/register", None, Page::NgoRegister),
    route("/organisation/register", None, Page::OrgRegister),
    route("/user/dashboard", INDIVIDUAL, Page::UserDashboard),
    route("/donate", INDIVIDUAL, Page::Donate),
    route("/profile", INDIVIDUAL, Page::Profile),
    route("/my-donations", INDIVIDUAL, Page::MyDonations),
    route("/admin-dashboard", ADMIN, Page::AdminDashboard),
    route("/admin-profile", ADMIN, Page::AdminProfile),
    route("/admin/donations", ADMIN, Page::AdminDonations),
    route("/admin/donations/:donationId", ADMIN, Page::AdminDonationDetail),
    route("/admin/users", ADMIN, Page::AdminUsers),
    route("/admin/verify-ngo", ADMIN, Page::VerifyNgo),
    route("/admin/verify-org", ADMIN, Page::VerifyOrganization),
    route("/admin/delete-donations", ADMIN, Page::AdminDeleteDonations),
    route("/ngo/dashboard", NGO, Page::NgoDashboard),
    route("/ngo/profile", NGO, Page::NgoProfile),
    route("/organisation/dashboard", ORGANIZATION, Page::OrgDashboard),
];

pub static NOT_FOUND: RouteEntry = route("*", PUBLIC, Page::NotFound);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub entry: &'static RouteEntry,
    pub path: String,
    pub params: Vec<(&'static str, String)>,
}

impl ResolvedRoute {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let path = path.trim_end_matches('/');

    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn match_pattern(pattern: &'static str, path: &str) -> Option<Vec<(&'static str, String)>> {
    let mut wanted = pattern.split('/');
    let mut given = path.split('/');
    let mut params = Vec::new();

    loop {
        match (wanted.next(), given.next()) {
            (None, None) => return Some(params),
            (Some(segment), Some(value)) => {
                if let Some(name) = segment.strip_prefix(':') {
                    if value.is_empty() {
                        return None;
                    }
                    params.push((name, value.to_string()));
                } else if segment != value {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

pub fn resolve(path: &str) -> ResolvedRoute {
    let path = normalize(path);

    for entry in &ROUTES {
        if let Some(params) = match_pattern(entry.pattern, &path) {
            return ResolvedRoute {
                entry,
                path,
                params,
            };
        }
    }

    ResolvedRoute {
        entry: &NOT_FOUND,
        path,
        params: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_published_path_resolves_to_itself() {
        for entry in ROUTES.iter().filter(|entry| !entry.pattern.contains(':')) {
            assert_eq!(resolve(entry.pattern).entry, entry, "{}", entry.pattern);
        }
    }

    #[test]
    fn donation_detail_binds_its_id() {
        let resolved = resolve("/admin/donations/42");
        assert_eq!(resolved.entry.page, Page::AdminDonationDetail);
        assert_eq!(resolved.param("donationId"), Some("42"));
        assert_eq!(resolved.entry.shell, Some(ShellKind::Admin));
    }

    #[test]
    fn query_strings_and_trailing_slashes_are_ignored() {
        assert_eq!(resolve("/reset-password?token=abc").entry.page, Page::ResetPassword);
        assert_eq!(resolve("/admin/users/").entry.page, Page::AdminUsers);
        assert_eq!(resolve("").entry.page, Page::Home);
    }

    #[test]
    fn unknown_paths_fall_back_to_public_not_found() {
        let resolved = resolve("/ngo/claim");
        assert_eq!(resolved.entry.page, Page::NotFound);
        assert_eq!(resolved.entry.shell, Some(ShellKind::Public));
        assert_eq!(resolved.path, "/ngo/claim");
    }

    #[test]
    fn standalone_auth_pages_have_no_shell() {
        for path in ["/ngo/login", "/ngo/register", "/organisation/register"] {
            assert_eq!(resolve(path).entry.shell, None);
        }
    }

    #[test]
    fn params_do_not_match_empty_segments() {
        assert_eq!(resolve("/admin/donations//").entry.page, Page::AdminDonations);
        assert_eq!(resolve("/admin/donations/7/edit").entry.page, Page::NotFound);
    }
}
