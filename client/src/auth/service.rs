//! Core logic for the authentication flows.
//!
//! Each flow validates its form, issues one request through the gateway and
//! reports where the caller should go next. Sessions are cookie based, so a
//! successful sign-in leaves nothing to store on this side.

use mealmitra_adapters::{ApiClient, ApiResponse, MessageResponse, RequestBody};
use tracing::{info, instrument};

use super::{
    errors::AuthError,
    models::{
        ClaimSource, Credentials, NgoCredentials, NgoRegistration, OrgRegistration,
        PasswordReset, Registration, RoleClaim,
    },
    routes::{ADMIN_DASHBOARD, LOGIN, NGO_DASHBOARD, NGO_LOGIN, ORG_DASHBOARD, USER_DASHBOARD},
};

/// Outcome of a successful sign-in: the server's message and the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub message: Option<String>,
    pub claim: Option<RoleClaim>,
    pub destination: &'static str,
}

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

fn server_message(response: &ApiResponse, path: &str) -> Option<String> {
    response
        .json::<MessageResponse>(path)
        .ok()
        .map(|reply| reply.message)
        .filter(|text| !text.trim().is_empty())
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Donor and admin sign-in. The follow-up profile read decides the landing page.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn login(&self, form: &Credentials) -> Result<SignedIn, AuthError> {
        form.validate()?;

        let response = self
            .client
            .post("/login", form.body())
            .await
            .map_err(AuthError::rejected("login"))?;

        let profile = self
            .client
            .get("/profile")
            .await
            .map_err(AuthError::ProfileUnavailable)?;
        let claim = RoleClaim::from_probe(ClaimSource::UserProfile, &profile.body);

        let destination = if claim.is_admin {
            ADMIN_DASHBOARD
        } else {
            USER_DASHBOARD
        };
        info!("signed in, landing on {destination}");

        Ok(SignedIn {
            message: server_message(&response, "/login"),
            claim: Some(claim),
            destination,
        })
    }

    /// Returns the username so the dialog can prefill the login tab.
    pub async fn register(&self, form: &Registration) -> Result<String, AuthError> {
        form.validate()?;

        self.client
            .post("/register", form.body())
            .await
            .map_err(AuthError::rejected("registration"))?;

        info!("registered {}", form.username);
        Ok(form.username.clone())
    }

    pub async fn ngo_login(&self, form: &NgoCredentials) -> Result<SignedIn, AuthError> {
        form.validate()?;

        let response = self
            .client
            .post("/ngo/login", form.body())
            .await
            .map_err(AuthError::rejected("NGO login"))?;

        Ok(SignedIn {
            message: server_message(&response, "/ngo/login"),
            claim: None,
            destination: NGO_DASHBOARD,
        })
    }

    pub async fn ngo_register(&self, form: &NgoRegistration) -> Result<SignedIn, AuthError> {
        form.validate()?;

        let response = self
            .client
            .post("/ngo/register", form.body())
            .await
            .map_err(AuthError::rejected("NGO registration"))?;

        Ok(SignedIn {
            message: server_message(&response, "/ngo/register"),
            claim: None,
            destination: NGO_LOGIN,
        })
    }

    pub async fn org_register(&self, form: &OrgRegistration) -> Result<SignedIn, AuthError> {
        form.validate()?;

        let response = self
            .client
            .post("/register/organization", form.body())
            .await
            .map_err(AuthError::rejected("organization registration"))?;

        Ok(SignedIn {
            message: server_message(&response, "/register/organization"),
            claim: None,
            destination: ORG_DASHBOARD,
        })
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }

        self.client
            .post("/forgot-password", RequestBody::form([("email", email)]))
            .await
            .map_err(AuthError::rejected("password recovery"))?;

        Ok(())
    }

    pub async fn reset_password(&self, form: &PasswordReset) -> Result<&'static str, AuthError> {
        form.validate()?;

        self.client
            .post("/reset-password", form.body())
            .await
            .map_err(AuthError::rejected("password reset"))?;

        Ok(LOGIN)
    }

    pub async fn logout(&self) -> Result<(), AuthError> {
        self.client
            .post("/logout", RequestBody::Empty)
            .await
            .map_err(AuthError::rejected("logout"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mealmitra_adapters::{Method, ScriptedTransport};
    use serde_json::json;

    use super::*;

    fn service(transport: Arc<ScriptedTransport>) -> AuthService {
        AuthService::new(ApiClient::new(transport))
    }

    #[tokio::test]
    async fn admin_login_lands_on_admin_dashboard() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .on(Method::Post, "/login", 200, json!({"message": "Login successful"}))
                .on(
                    Method::Get,
                    "/profile",
                    200,
                    json!({"user": {"id": 1, "username": "ravi", "is_admin": true}}),
                ),
        );

        let signed_in = service(transport.clone())
            .login(&Credentials::new("ravi", "pw"))
            .await
            .unwrap();

        assert_eq!(signed_in.destination, ADMIN_DASHBOARD);
        assert_eq!(signed_in.message.as_deref(), Some("Login successful"));
        assert_eq!(transport.count(Method::Get, "/profile"), 1);
    }

    #[tokio::test]
    async fn rejected_login_skips_the_profile_read() {
        let transport = Arc::new(ScriptedTransport::new().on(
            Method::Post,
            "/login",
            401,
            json!({"detail": "Incorrect username or password"}),
        ));

        let err = service(transport.clone())
            .login(&Credentials::new("ravi", "nope"))
            .await
            .unwrap_err();

        assert_eq!(
            err.user_message("Invalid credentials or server error"),
            "Incorrect username or password"
        );
        assert_eq!(transport.count(Method::Get, "/profile"), 0);
    }

    #[tokio::test]
    async fn blank_forms_never_reach_the_server() {
        let transport = Arc::new(ScriptedTransport::new());
        let err = service(transport.clone())
            .forgot_password(" ")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::MissingField("email")));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn org_registration_posts_the_business_form() {
        let transport = Arc::new(ScriptedTransport::new().on(
            Method::Post,
            "/register/organization",
            200,
            json!({"message": "Organization registered"}),
        ));
        let form = OrgRegistration {
            business_name: "Annapurna Mess".into(),
            email: "mess@example.org".into(),
            password: "pw".into(),
            role: "Mess".into(),
            fssai_license: "10012345000123".into(),
            address: "MG Road".into(),
            phone_number: "9845012345".into(),
        };

        let signed_in = service(transport.clone()).org_register(&form).await.unwrap();
        assert_eq!(signed_in.destination, ORG_DASHBOARD);

        let calls = transport.calls();
        assert_eq!(calls[0].body.field("business_name"), Some("Annapurna Mess"));
        assert!(matches!(calls[0].body, RequestBody::Form(_)));
    }
}
