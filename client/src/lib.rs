//! Client core for the Meal-Mitra food donation platform.
//!
//! The crate maps every page path to the role family that owns it, guards
//! role-scoped areas with a session probe, and wraps authorized pages in
//! their role's chrome. All network access goes through the
//! `mealmitra_adapters` gateway.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod errors;
pub mod navigator;
pub mod routes;
pub mod services;
pub mod utils;

pub use app::{App, Visit};
pub use config::ClientConfig;
pub use errors::ClientError;
