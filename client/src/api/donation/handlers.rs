//! Handler functions for the donation endpoints.

use mealmitra_adapters::{ApiClient, Donation, DonationReceipt, RequestBody};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    api::{fetch, notice_for},
    errors::ClientError,
    services::{cleanup::CleanedFoodPreview, notice::Notice},
};

/// Status the claim board shows once a claim went through.
pub const CLAIMED: &str = "claimed";

const SUBMIT_FAILED: &str = "Unable to submit donation. Please try again.";

/// Free-text donation as typed by the donor, plus where and when it was cooked.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DonationDraft {
    pub text: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub cooked_at: Option<String>,
}

impl DonationDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn body(&self) -> RequestBody {
        let mut fields = vec![("text".to_string(), self.text.clone())];
        if let (Some(lat), Some(lng)) = (self.lat, self.lng) {
            fields.push(("lat".to_string(), lat.to_string()));
            fields.push(("lng".to_string(), lng.to_string()));
        }
        if let Some(cooked_at) = self.cooked_at.as_deref().filter(|v| !v.trim().is_empty()) {
            fields.push(("cooked_at".to_string(), cooked_at.to_string()));
        }
        RequestBody::Form(fields)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedDonation {
    pub donation_id: i64,
    pub preview: CleanedFoodPreview,
    pub notice: Notice,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitFailure {
    pub notice: Notice,
    /// The session is gone; the caller should send the donor to sign in.
    pub login_required: bool,
}

#[derive(Clone)]
pub struct DonationHandlers {
    client: ApiClient,
}

impl DonationHandlers {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn available(&self) -> Result<Vec<Donation>, ClientError> {
        fetch(&self.client, "/donations").await
    }

    pub async fn mine(&self) -> Result<Vec<Donation>, ClientError> {
        fetch(&self.client, "/my-donations").await
    }

    pub async fn submit(&self, draft: &DonationDraft) -> Result<SubmittedDonation, SubmitFailure> {
        if draft.text.trim().is_empty() {
            return Err(SubmitFailure {
                notice: Notice::error("Please describe the food you want to donate."),
                login_required: false,
            });
        }

        let outcome = self
            .client
            .post("/donations", draft.body())
            .await
            .and_then(|response| response.json::<DonationReceipt>("/donations"));

        match outcome {
            Ok(receipt) => {
                info!("donation {} accepted", receipt.donation_id);
                Ok(SubmittedDonation {
                    donation_id: receipt.donation_id,
                    preview: CleanedFoodPreview::from(&receipt.cleaned),
                    notice: Notice::success(
                        "Your donation is live. Nearby NGOs are being notified.",
                    ),
                })
            }
            Err(err) if err.is_unauthorized() => Err(SubmitFailure {
                notice: Notice::error("Please log in to donate food."),
                login_required: true,
            }),
            Err(err) => {
                warn!("donation submit failed: {err}");
                Err(SubmitFailure {
                    notice: Notice::from_failure(&err, SUBMIT_FAILED),
                    login_required: false,
                })
            }
        }
    }

    pub async fn claim(&self, id: i64) -> Notice {
        notice_for(
            self.client
                .post(&format!("/donations/{id}/claim"), RequestBody::Empty)
                .await,
            "Food donation claimed successfully!",
            "Failed to claim donation",
        )
    }
}

/// The list of claimable donations and their local status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimBoard {
    donations: Vec<Donation>,
}

impl ClaimBoard {
    pub fn new(donations: Vec<Donation>) -> Self {
        Self { donations }
    }

    pub async fn load(handlers: &DonationHandlers) -> Result<Self, ClientError> {
        Ok(Self::new(handlers.available().await?))
    }

    pub fn donations(&self) -> &[Donation] {
        &self.donations
    }

    /// Claims one donation. Only a successful claim changes the local status.
    pub async fn claim(&mut self, handlers: &DonationHandlers, id: i64) -> Notice {
        let notice = handlers.claim(id).await;

        if !notice.is_error() {
            if let Some(donation) = self.donations.iter_mut().find(|d| d.id == id) {
                donation.status = Some(CLAIMED.to_string());
            }
        }

        notice
    }
}
