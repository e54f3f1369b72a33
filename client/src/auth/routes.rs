//! Entry points of the authentication flows and each role family's home.
//!
//! These destinations are part of the public route list; bookmarks and links
//! depend on them, so they are spelled out once here and shared by the guard
//! policy table, the auth flows and the side navigation.

pub const ROOT: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const FORGOT_PASSWORD: &str = "/forgot-password";
pub const RESET_PASSWORD: &str = "/reset-password";
pub const NGO_LOGIN: &str = "/ngo/login";
pub const NGO_REGISTER: &str = "/ngo/register";
pub const ORG_REGISTER: &str = "/organisation/register";

pub const USER_DASHBOARD: &str = "/user/dashboard";
pub const ADMIN_DASHBOARD: &str = "/admin-dashboard";
pub const NGO_DASHBOARD: &str = "/ngo/dashboard";
pub const ORG_DASHBOARD: &str = "/organisation/dashboard";
