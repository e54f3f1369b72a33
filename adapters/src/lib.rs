//! Core `adapters` crate for the outbound side of the Meal-Mitra client.
//!
//! This crate defines the `Transport` trait, the single seam through which every
//! request leaves the process, and the `ApiClient` gateway that sits on top of
//! it. Two concrete transports are provided: `ReqwestTransport` for the real
//! REST service (with a cookie store so the server-issued session round-trips)
//! and `ScriptedTransport`, an in-memory stand-in for tests and demos.
//!
//! Response interception is an explicit, injectable `ResponseFallback`. The
//! default gateway installs none.

use async_trait::async_trait;

pub mod errors;
pub mod fallback;
pub mod gateway;
pub mod http;
pub mod models;
pub mod scripted;

pub use errors::GatewayError;
pub use fallback::{Fixture, FixtureFallback, FixtureMode, NoFallback, ResponseFallback};
pub use gateway::ApiClient;
pub use http::ReqwestTransport;
pub use models::{
    ApiRequest, ApiResponse, Badge, BadgeList, Donation, DonationReceipt, Identity,
    MessageResponse, Method, NgoApplication, NgoProfile, Organization, ParsedFood,
    ProfileResponse, RequestBody, UserRecord,
};
pub use scripted::{Gate, ScriptedTransport};

/// Sends one request and reports the raw outcome.
///
/// Implementations must reject non-2xx responses with [`GatewayError::Status`]
/// and must not retry, cache, or de-duplicate.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, GatewayError>;
}
