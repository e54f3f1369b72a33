//! Pluggable response substitution for endpoints the service does not serve yet.
//!
//! A [`ResponseFallback`] sees every outcome the gateway receives and may swap
//! it for a canned payload. Production gateways use [`NoFallback`]. The
//! [`FixtureFallback`] only ever touches requests matching one of its entries;
//! everything else passes through untouched, errors included.

use serde_json::{json, Value};
use tracing::warn;

use crate::{
    errors::GatewayError,
    models::{ApiRequest, ApiResponse, Method},
};

pub trait ResponseFallback: Send + Sync {
    fn on_success(&self, _request: &ApiRequest, response: ApiResponse) -> ApiResponse {
        response
    }

    fn on_failure(
        &self,
        _request: &ApiRequest,
        error: GatewayError,
    ) -> Result<ApiResponse, GatewayError> {
        Err(error)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl ResponseFallback for NoFallback {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureMode {
    /// Substitute only when the real call fails.
    OnFailure,
    /// Substitute every outcome, successful or not.
    Always,
}

#[derive(Debug, Clone)]
pub struct Fixture {
    pub method: Method,
    /// Matches a path equal to it or ending with it.
    pub pattern: String,
    pub payload: Value,
    pub mode: FixtureMode,
}

impl Fixture {
    pub fn new(method: Method, pattern: impl Into<String>, payload: Value, mode: FixtureMode) -> Self {
        Self {
            method,
            pattern: pattern.into(),
            payload,
            mode,
        }
    }

    pub fn matches(&self, request: &ApiRequest) -> bool {
        let path = request.path.split('?').next().unwrap_or_default();
        request.method == self.method && (path == self.pattern || path.ends_with(&self.pattern))
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixtureFallback {
    fixtures: Vec<Fixture>,
}

impl FixtureFallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, fixture: Fixture) -> Self {
        self.fixtures.push(fixture);
        self
    }

    /// Fixtures for routes the service has not shipped yet.
    pub fn development() -> Self {
        Self::new().with(Fixture::new(
            Method::Get,
            "/profile/badges",
            badges_fixture(),
            FixtureMode::Always,
        ))
    }

    fn find(&self, request: &ApiRequest) -> Option<&Fixture> {
        self.fixtures.iter().find(|fixture| fixture.matches(request))
    }
}

impl ResponseFallback for FixtureFallback {
    fn on_success(&self, request: &ApiRequest, response: ApiResponse) -> ApiResponse {
        match self.find(request) {
            Some(fixture) if fixture.mode == FixtureMode::Always => {
                ApiResponse::ok(fixture.payload.clone())
            }
            _ => response,
        }
    }

    fn on_failure(
        &self,
        request: &ApiRequest,
        error: GatewayError,
    ) -> Result<ApiResponse, GatewayError> {
        match self.find(request) {
            Some(fixture) => {
                warn!(
                    "{} {} failed ({error}), serving fixture",
                    request.method, request.path
                );
                Ok(ApiResponse::ok(fixture.payload.clone()))
            }
            None => Err(error),
        }
    }
}

pub fn badges_fixture() -> Value {
    json!({
        "badges": [
            {
                "id": 1,
                "badge_name": "First Donation",
                "sanskrit_name": "अन्नदाता (Annadātā)",
                "slug": "annadata",
                "description": "Unlocked on your very first food donation!",
                "icon_url": "https://cdn-icons-png.flaticon.com/512/2913/2913501.png",
                "level": 1,
                "unlocked_at": "2026-01-10T19:57:22.770570"
            },
            {
                "id": 2,
                "badge_name": "Kind Heart",
                "sanskrit_name": "करुणामयः (Karuṇāmayaḥ)",
                "slug": "karunamaya",
                "description": "Awarded for a donation manually verified as safe and high quality.",
                "icon_url": "https://cdn-icons-png.flaticon.com/512/2107/2107845.png",
                "level": 1,
                "unlocked_at": "2026-01-10T19:57:22.771040"
            }
        ]
    })
}
