//! Module for donor-facing account endpoints.
//!
//! This module covers what a signed-in donor reads about themselves: the
//! identity, the profile with its donation history, the dashboard figures and
//! the earned badges.

pub mod handlers;

pub use handlers::*;
