//! Central module for client-wide configuration settings.
//!
//! This module loads the REST service address, whether development fixtures
//! are served for missing endpoints, and the viewport width from which the
//! sidebar is pinned. Values come from the environment; missing ones fall back
//! to defaults and are logged.

use std::{env, fmt::Display, str::FromStr};

use mealmitra_adapters::http::parse_base_url;
use tracing::{info, warn};

use crate::{errors::ClientError, services::navigation::DEFAULT_WIDE_VIEWPORT_PX};

pub const API_BASE_VAR: &str = "MEALMITRA_API_BASE";
pub const FIXTURES_VAR: &str = "MEALMITRA_FIXTURES";
pub const WIDE_VIEWPORT_VAR: &str = "MEALMITRA_WIDE_VIEWPORT";

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Serve canned payloads for endpoints the service does not ship yet.
    pub fixtures: bool,
    pub wide_viewport_px: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            fixtures: false,
            wide_viewport_px: DEFAULT_WIDE_VIEWPORT_PX,
        }
    }
}

impl ClientConfig {
    pub fn load() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `load` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            api_base_url: try_load(&lookup, API_BASE_VAR, DEFAULT_API_BASE)?,
            fixtures: parse_flag(&lookup, FIXTURES_VAR)?,
            wide_viewport_px: try_load(
                &lookup,
                WIDE_VIEWPORT_VAR,
                &DEFAULT_WIDE_VIEWPORT_PX.to_string(),
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        parse_base_url(&self.api_base_url)
            .map_err(|err| ClientError::Config(format!("{API_BASE_VAR}: {err}")))?;

        if self.wide_viewport_px == 0 {
            return Err(ClientError::Config(format!(
                "{WIDE_VIEWPORT_VAR} must be greater than zero"
            )));
        }

        if self.fixtures {
            warn!("Development fixtures are enabled; some responses will be canned");
        }

        Ok(())
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ClientError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|err| {
        warn!("Invalid {key} value: {err}");
        ClientError::Config(format!("{key}: {err}"))
    })
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<bool, ClientError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|raw| raw.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(raw) => match raw.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "" | "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ClientError::Config(format!("{key}: expected a boolean, got {raw}"))),
        },
    }
}
