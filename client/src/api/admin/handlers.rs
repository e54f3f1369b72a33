//! Handler functions for the admin console.
//!
//! Reads return the server's records as-is. Verification, promotion and
//! deletion return a notice; pages re-read their list afterwards.

use std::fmt;

use mealmitra_adapters::{
    ApiClient, Donation, NgoApplication, Organization, ProfileResponse, RequestBody, UserRecord,
};
use serde::Serialize;
use serde_json::Value;

use crate::{
    api::{fetch, notice_for},
    errors::ClientError,
    services::notice::Notice,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyAction {
    Approve,
    Reject,
}

impl VerifyAction {
    pub fn as_str(self) -> &'static str {
        match self {
            VerifyAction::Approve => "approve",
            VerifyAction::Reject => "reject",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            VerifyAction::Approve => "approved",
            VerifyAction::Reject => "rejected",
        }
    }
}

impl fmt::Display for VerifyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct AdminHandlers {
    client: ApiClient,
}

impl AdminHandlers {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Platform-wide figures. The shape belongs to the server and is passed through.
    pub async fn dashboard(&self) -> Result<Value, ClientError> {
        fetch(&self.client, "/dashboard/admin").await
    }

    pub async fn profile(&self) -> Result<UserRecord, ClientError> {
        let profile: ProfileResponse = fetch(&self.client, "/profile").await?;
        Ok(profile.user)
    }

    pub async fn users(&self) -> Result<Vec<UserRecord>, ClientError> {
        fetch(&self.client, "/admin/users").await
    }

    pub async fn promote(&self, user_id: i64) -> Notice {
        notice_for(
            self.client
                .post(&format!("/admin/promote/{user_id}"), RequestBody::Empty)
                .await,
            "User promoted successfully",
            "Failed to promote user",
        )
    }

    pub async fn donations(&self) -> Result<Vec<Donation>, ClientError> {
        fetch(&self.client, "/admin/donations").await
    }

    /// There is no single-donation endpoint; the full list is read and searched.
    pub async fn donation(&self, id: i64) -> Result<Option<Donation>, ClientError> {
        let donations = self.donations().await?;
        Ok(donations.into_iter().find(|donation| donation.id == id))
    }

    pub async fn delete_donation(&self, id: i64) -> Notice {
        notice_for(
            self.client.delete(&format!("/admin/donations/{id}")).await,
            "Donation deleted successfully",
            "Failed to delete donation",
        )
    }

    pub async fn ngos(&self) -> Result<Vec<NgoApplication>, ClientError> {
        fetch(&self.client, "/admin/ngos").await
    }

    pub async fn verify_ngo(&self, id: i64) -> Notice {
        notice_for(
            self.client
                .post(&format!("/admin/ngos/{id}/verify"), RequestBody::Empty)
                .await,
            "NGO verified successfully!",
            "Failed to verify NGO",
        )
    }

    pub async fn organizations(&self) -> Result<Vec<Organization>, ClientError> {
        fetch(&self.client, "/admin/organizations").await
    }

    pub async fn verify_organization(&self, user_id: i64, action: VerifyAction) -> Notice {
        let outcome = self
            .client
            .post_with(
                &format!("/admin/organizations/{user_id}/verify"),
                RequestBody::Empty,
                &[("action", action.as_str())],
            )
            .await;

        notice_for(
            outcome,
            &format!("Organization {} successfully", action.past_tense()),
            &format!("Failed to {action} organization"),
        )
    }
}
