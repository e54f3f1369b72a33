//! Module for the admin console endpoints: users, donations, and NGO and
//! organization verification.

pub mod handlers;

pub use handlers::*;
