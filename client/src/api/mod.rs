//! Page-level handlers for the application's REST endpoints.
//!
//! Each submodule covers one area of the service: donations, the admin
//! console, the NGO profile and the donor's own pages. Reads decode into the
//! adapters' records and return errors to the caller; mutations always end in
//! a [`Notice`].

pub mod admin;
pub mod donation;
pub mod ngo;
pub mod user;

use mealmitra_adapters::{ApiClient, ApiResponse, GatewayError};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::{errors::ClientError, services::notice::Notice};

/// GETs `path` and decodes the body.
pub(crate) async fn fetch<T: DeserializeOwned>(
    client: &ApiClient,
    path: &str,
) -> Result<T, ClientError> {
    let response = client.get(path).await?;
    Ok(response.json(path)?)
}

/// Turns a mutation outcome into the notice shown to the user.
pub(crate) fn notice_for(
    outcome: Result<ApiResponse, GatewayError>,
    success: &str,
    generic: &str,
) -> Notice {
    match outcome {
        Ok(_) => Notice::success(success),
        Err(err) => {
            warn!("{generic}: {err}");
            Notice::from_failure(&err, generic)
        }
    }
}
