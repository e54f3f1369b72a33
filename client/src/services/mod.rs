//! Module for the client's page-independent services.
//!
//! Role shells and their chrome (top bar identity, side navigation), user
//! notices, and the donation preview live here. Shells orchestrate the session
//! guard, the gateway and the navigator for one role family.

pub mod cleanup;
pub mod identity;
pub mod navigation;
pub mod notice;
pub mod shell;
