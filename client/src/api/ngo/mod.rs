//! Module for the NGO partner's own profile.

pub mod handlers;

pub use handlers::*;
