//! Module for the donation endpoints.
//!
//! Listing available food, claiming it, submitting a new donation from free
//! text and reading back the donor's own donations.

pub mod handlers;

pub use handlers::*;
