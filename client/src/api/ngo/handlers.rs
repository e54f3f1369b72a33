//! Handler functions for the NGO profile page.

use mealmitra_adapters::{ApiClient, NgoProfile, RequestBody};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{api::fetch, errors::ClientError, services::notice::Notice};

/// Editable part of an NGO profile, sent as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgoProfileUpdate {
    pub name: String,
    pub email: String,
    pub ngo_type: String,
    pub id_proof: String,
    pub address_proof: String,
}

impl From<&NgoProfile> for NgoProfileUpdate {
    fn from(profile: &NgoProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone().unwrap_or_default(),
            ngo_type: profile.ngo_type.clone().unwrap_or_default(),
            id_proof: profile.id_proof.clone().unwrap_or_default(),
            address_proof: profile.address_proof.clone().unwrap_or_default(),
        }
    }
}

#[derive(Clone)]
pub struct NgoHandlers {
    client: ApiClient,
}

impl NgoHandlers {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn profile(&self) -> Result<NgoProfile, ClientError> {
        fetch(&self.client, "/ngo/profile").await
    }

    /// Saves the profile and returns what the server stored.
    pub async fn update_profile(
        &self,
        update: &NgoProfileUpdate,
    ) -> Result<(NgoProfile, Notice), Notice> {
        let body = serde_json::to_value(update).map_err(|err| {
            warn!("could not encode profile update: {err}");
            Notice::error("Update failed")
        })?;

        let saved = self
            .client
            .put("/ngo/profile", RequestBody::Json(body))
            .await
            .and_then(|response| response.json::<NgoProfile>("/ngo/profile"));

        match saved {
            Ok(profile) => Ok((profile, Notice::success("Profile updated successfully"))),
            Err(err) => {
                warn!("NGO profile update failed: {err}");
                Err(Notice::from_failure(&err, "Update failed"))
            }
        }
    }
}
