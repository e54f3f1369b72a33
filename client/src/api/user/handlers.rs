//! Handler functions for the signed-in donor's own data.

use mealmitra_adapters::{ApiClient, BadgeList, Identity, ProfileResponse};
use serde_json::Value;

use crate::{api::fetch, errors::ClientError};

#[derive(Clone)]
pub struct UserHandlers {
    client: ApiClient,
}

impl UserHandlers {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn me(&self) -> Result<Identity, ClientError> {
        fetch(&self.client, "/me").await
    }

    pub async fn profile(&self) -> Result<ProfileResponse, ClientError> {
        fetch(&self.client, "/profile").await
    }

    /// Impact figures for the dashboard, passed through as the server sends them.
    pub async fn dashboard(&self) -> Result<Value, ClientError> {
        fetch(&self.client, "/dashboard/user").await
    }

    pub async fn badges(&self) -> Result<BadgeList, ClientError> {
        fetch(&self.client, "/profile/badges").await
    }
}
