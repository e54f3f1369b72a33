//! Authentication module for sessions, role checks and the sign-in forms.
//!
//! This module provides the role policy table and the single session guard
//! that enforces it, plus the login, registration and password recovery flows
//! for donors, NGOs and organizations.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use handlers::*;
pub use middleware::*;
pub use models::*;
pub use service::*;
