//! Form submission handlers for the authentication pages and dialog.
//!
//! A handler runs one flow from `auth::service`, turns the result into a
//! notice and, on success, asks the navigator for the next page. On failure
//! nothing navigates and the caller keeps its form as typed.

use std::sync::Arc;

use tracing::warn;

use super::{
    errors::AuthError,
    models::{
        Credentials, NgoCredentials, NgoRegistration, OrgRegistration, PasswordReset,
        Registration,
    },
    service::{AuthService, SignedIn},
};
use crate::{
    navigator::Navigator,
    services::{
        notice::Notice,
        shell::{AuthDialog, AuthTab},
    },
};

const LOGIN_FAILED: &str = "Invalid credentials or server error";
const REGISTER_FAILED: &str = "Registration failed. Username might be taken.";
const NGO_LOGIN_FAILED: &str = "Login failed";
const SIGNUP_FAILED: &str = "Registration failed";
const RECOVERY_SENT: &str = "Recovery email sent if the account exists";
const RECOVERY_FAILED: &str = "Failed to send recovery email. Please try again.";
const RESET_DONE: &str = "Password updated successfully! Please login.";
const RESET_FAILED: &str = "Failed to reset password. Token may be invalid or expired.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOutcome {
    pub notice: Notice,
    pub navigated_to: Option<&'static str>,
}

impl FormOutcome {
    fn failed(err: &AuthError, generic: &str) -> Self {
        warn!("auth form rejected: {err}");
        Self {
            notice: Notice::error(err.user_message(generic)),
            navigated_to: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        !self.notice.is_error()
    }
}

/// Result of the register tab: on success the login tab is prefilled with the new username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    pub notice: Notice,
    pub login_prefill: Option<Credentials>,
}

#[derive(Clone)]
pub struct AuthForms {
    service: AuthService,
    navigator: Arc<dyn Navigator>,
}

impl AuthForms {
    pub fn new(service: AuthService, navigator: Arc<dyn Navigator>) -> Self {
        Self { service, navigator }
    }

    fn land(&self, destination: &'static str, message: String) -> FormOutcome {
        self.navigator.navigate(destination);
        FormOutcome {
            notice: Notice::success(message),
            navigated_to: Some(destination),
        }
    }

    fn land_with_server_message(&self, signed_in: SignedIn, fallback: &str) -> FormOutcome {
        let message = signed_in.message.unwrap_or_else(|| fallback.to_string());
        self.land(signed_in.destination, message)
    }

    pub async fn login(&self, form: &Credentials) -> FormOutcome {
        match self.service.login(form).await {
            Ok(signed_in) => self.land(signed_in.destination, "Login successful!".to_string()),
            Err(err) => FormOutcome::failed(&err, LOGIN_FAILED),
        }
    }

    /// Registers from the auth dialog and flips it to the login tab on success.
    pub async fn register(
        &self,
        form: &Registration,
        dialog: Option<&AuthDialog>,
    ) -> RegisterOutcome {
        match self.service.register(form).await {
            Ok(username) => {
                if let Some(dialog) = dialog {
                    dialog.open(AuthTab::Login);
                }
                RegisterOutcome {
                    notice: Notice::success("Registration successful! Please login."),
                    login_prefill: Some(Credentials::new(username, "")),
                }
            }
            Err(err) => {
                warn!("registration rejected: {err}");
                RegisterOutcome {
                    notice: Notice::error(err.user_message(REGISTER_FAILED)),
                    login_prefill: None,
                }
            }
        }
    }

    pub async fn ngo_login(&self, form: &NgoCredentials) -> FormOutcome {
        match self.service.ngo_login(form).await {
            Ok(signed_in) => self.land_with_server_message(signed_in, "Login successful!"),
            Err(err) => FormOutcome::failed(&err, NGO_LOGIN_FAILED),
        }
    }

    pub async fn ngo_register(&self, form: &NgoRegistration) -> FormOutcome {
        match self.service.ngo_register(form).await {
            Ok(signed_in) => self.land_with_server_message(signed_in, "Registration successful"),
            Err(err) => FormOutcome::failed(&err, SIGNUP_FAILED),
        }
    }

    pub async fn org_register(&self, form: &OrgRegistration) -> FormOutcome {
        match self.service.org_register(form).await {
            Ok(signed_in) => self.land_with_server_message(signed_in, "Registration successful"),
            Err(err) => FormOutcome::failed(&err, SIGNUP_FAILED),
        }
    }

    /// Reports success whether or not the address has an account.
    pub async fn forgot_password(&self, email: &str) -> FormOutcome {
        match self.service.forgot_password(email).await {
            Ok(()) => FormOutcome {
                notice: Notice::success(RECOVERY_SENT),
                navigated_to: None,
            },
            Err(err @ AuthError::MissingField(_)) => FormOutcome::failed(&err, RECOVERY_FAILED),
            Err(err) => {
                warn!("password recovery failed: {err}");
                FormOutcome {
                    notice: Notice::error(RECOVERY_FAILED),
                    navigated_to: None,
                }
            }
        }
    }

    pub async fn reset_password(&self, form: &PasswordReset) -> FormOutcome {
        match self.service.reset_password(form).await {
            Ok(destination) => {
                self.navigator.navigate(destination);
                FormOutcome {
                    notice: Notice::success(RESET_DONE),
                    navigated_to: Some(destination),
                }
            }
            Err(err @ (AuthError::MissingField(_) | AuthError::PasswordMismatch)) => {
                FormOutcome::failed(&err, RESET_FAILED)
            }
            Err(err) => {
                warn!("password reset failed: {err}");
                FormOutcome {
                    notice: Notice::error(RESET_FAILED),
                    navigated_to: None,
                }
            }
        }
    }
}
