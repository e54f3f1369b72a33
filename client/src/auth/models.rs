//! Data structures for role-scoped access.
//!
//! This module defines the role families the client knows about, the role
//! claim derived from a probe response, and the declarative policy table the
//! session guard consumes. There is exactly one guard implementation; every
//! shell differs only by its row in [`ROLE_POLICIES`].

use std::fmt;

use mealmitra_adapters::RequestBody;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::AuthError;
use super::routes::{
    ADMIN_DASHBOARD, LOGIN, NGO_DASHBOARD, NGO_LOGIN, ORG_DASHBOARD, ROOT, USER_DASHBOARD,
};

/// Role tag the service assigns to individual donors.
pub const INDIVIDUAL_ROLE: &str = "Individual";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShellKind {
    Public,
    Individual,
    Ngo,
    Organization,
    Admin,
}

impl ShellKind {
    pub const ALL: [ShellKind; 5] = [
        ShellKind::Public,
        ShellKind::Individual,
        ShellKind::Ngo,
        ShellKind::Organization,
        ShellKind::Admin,
    ];
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShellKind::Public => "public",
            ShellKind::Individual => "individual",
            ShellKind::Ngo => "ngo",
            ShellKind::Organization => "organization",
            ShellKind::Admin => "admin",
        };
        f.write_str(name)
    }
}

/// Which probe body shape a claim is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimSource {
    /// `{"user": {"username", "is_admin", "role"}, ...}`
    UserProfile,
    /// The NGO record itself; a successful probe means the caller has one.
    NgoProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSpec {
    pub path: &'static str,
    pub source: ClaimSource,
}

/// What a probe body says about the caller. Lives for one guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RoleClaim {
    pub username: Option<String>,
    pub is_admin: bool,
    pub role: Option<String>,
    pub has_ngo_profile: bool,
}

impl RoleClaim {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_probe(source: ClaimSource, body: &Value) -> Self {
        match source {
            ClaimSource::UserProfile => {
                let user = &body["user"];
                Self {
                    username: user["username"].as_str().map(str::to_string),
                    is_admin: user["is_admin"].as_bool().unwrap_or(false),
                    role: user["role"].as_str().map(str::to_string),
                    has_ngo_profile: false,
                }
            }
            ClaimSource::NgoProfile => Self {
                username: body["name"].as_str().map(str::to_string),
                is_admin: false,
                role: None,
                has_ngo_profile: true,
            },
        }
    }

    pub fn is_individual(&self) -> bool {
        self.role.as_deref() == Some(INDIVIDUAL_ROLE)
    }

    /// The caller's own landing page, used when they knock on the wrong door.
    pub fn home(&self) -> &'static str {
        if self.is_admin {
            ADMIN_DASHBOARD
        } else if self.has_ngo_profile {
            NGO_DASHBOARD
        } else if self.role.is_some() && !self.is_individual() {
            ORG_DASHBOARD
        } else {
            USER_DASHBOARD
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolePredicate {
    Always,
    AnySession,
    Admin,
    NotIndividual,
    NgoProfile,
}

impl RolePredicate {
    pub fn holds(&self, claim: &RoleClaim) -> bool {
        match self {
            RolePredicate::Always | RolePredicate::AnySession => true,
            RolePredicate::Admin => claim.is_admin,
            RolePredicate::NotIndividual => !claim.is_individual(),
            RolePredicate::NgoProfile => claim.has_ngo_profile,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePolicy {
    pub shell: ShellKind,
    /// `None` means the area is open and nothing is probed.
    pub probe: Option<ProbeSpec>,
    pub predicate: RolePredicate,
    /// Where callers without a usable session are sent.
    pub login_entry: &'static str,
}

const USER_PROBE: ProbeSpec = ProbeSpec {
    path: "/profile",
    source: ClaimSource::UserProfile,
};

const NGO_PROBE: ProbeSpec = ProbeSpec {
    path: "/ngo/profile",
    source: ClaimSource::NgoProfile,
};

pub static ROLE_POLICIES: [RolePolicy; 5] = [
    RolePolicy {
        shell: ShellKind::Public,
        probe: None,
        predicate: RolePredicate::Always,
        login_entry: ROOT,
    },
    RolePolicy {
        shell: ShellKind::Individual,
        probe: Some(USER_PROBE),
        predicate: RolePredicate::AnySession,
        login_entry: LOGIN,
    },
    RolePolicy {
        shell: ShellKind::Admin,
        probe: Some(USER_PROBE),
        predicate: RolePredicate::Admin,
        login_entry: ROOT,
    },
    RolePolicy {
        shell: ShellKind::Organization,
        probe: Some(USER_PROBE),
        predicate: RolePredicate::NotIndividual,
        login_entry: ROOT,
    },
    RolePolicy {
        shell: ShellKind::Ngo,
        probe: Some(NGO_PROBE),
        predicate: RolePredicate::NgoProfile,
        login_entry: NGO_LOGIN,
    },
];

pub fn policy_for(shell: ShellKind) -> &'static RolePolicy {
    ROLE_POLICIES
        .iter()
        .find(|policy| policy.shell == shell)
        .unwrap_or(&ROLE_POLICIES[0])
}

/// Fails with the name of the first required field left blank.
fn require(fields: &[(&'static str, &str)]) -> Result<(), AuthError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(AuthError::MissingField(name)),
        None => Ok(()),
    }
}

/// Donor and admin sign-in form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        require(&[("username", &self.username), ("password", &self.password)])
    }

    pub fn body(&self) -> RequestBody {
        RequestBody::form([
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), AuthError> {
        require(&[
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
        ])
    }

    pub fn body(&self) -> RequestBody {
        RequestBody::form([
            ("username", self.username.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NgoCredentials {
    pub email: String,
    pub password: String,
}

impl NgoCredentials {
    pub fn validate(&self) -> Result<(), AuthError> {
        require(&[("email", &self.email), ("password", &self.password)])
    }

    pub fn body(&self) -> RequestBody {
        RequestBody::multipart([
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
        ])
    }
}

/// NGO sign-up. The two proofs are document references the service stores as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NgoRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub ngo_type: String,
    pub id_proof: String,
    pub address_proof: String,
}

impl NgoRegistration {
    pub fn validate(&self) -> Result<(), AuthError> {
        require(&[
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
            ("ngo_type", &self.ngo_type),
            ("id_proof", &self.id_proof),
            ("address_proof", &self.address_proof),
        ])
    }

    pub fn body(&self) -> RequestBody {
        RequestBody::multipart([
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
            ("ngo_type", self.ngo_type.as_str()),
            ("id_proof", self.id_proof.as_str()),
            ("address_proof", self.address_proof.as_str()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrgRegistration {
    pub business_name: String,
    pub email: String,
    pub password: String,
    /// Business type, e.g. `Restaurant`, `Mess`, `Canteen`.
    pub role: String,
    pub fssai_license: String,
    pub address: String,
    pub phone_number: String,
}

impl OrgRegistration {
    pub fn validate(&self) -> Result<(), AuthError> {
        require(&[
            ("business_name", &self.business_name),
            ("email", &self.email),
            ("password", &self.password),
            ("role", &self.role),
            ("fssai_license", &self.fssai_license),
            ("address", &self.address),
            ("phone_number", &self.phone_number),
        ])
    }

    pub fn body(&self) -> RequestBody {
        RequestBody::form([
            ("business_name", self.business_name.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
            ("role", self.role.as_str()),
            ("fssai_license", self.fssai_license.as_str()),
            ("address", self.address.as_str()),
            ("phone_number", self.phone_number.as_str()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PasswordReset {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordReset {
    pub fn validate(&self) -> Result<(), AuthError> {
        require(&[("token", &self.token), ("new_password", &self.new_password)])?;
        if self.new_password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }

    pub fn body(&self) -> RequestBody {
        RequestBody::form([
            ("token", self.token.as_str()),
            ("new_password", self.new_password.as_str()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(user: Value) -> RoleClaim {
        RoleClaim::from_probe(ClaimSource::UserProfile, &json!({ "user": user }))
    }

    #[test]
    fn every_shell_has_a_policy() {
        for shell in ShellKind::ALL {
            assert_eq!(policy_for(shell).shell, shell);
        }
    }

    #[test]
    fn only_the_public_shell_skips_the_probe() {
        for policy in &ROLE_POLICIES {
            assert_eq!(policy.probe.is_none(), policy.shell == ShellKind::Public);
        }
    }

    #[test]
    fn claim_reads_admin_flag_and_role() {
        let claim = profile(json!({"username": "ravi", "is_admin": true, "role": "Individual"}));
        assert_eq!(claim.username.as_deref(), Some("ravi"));
        assert!(claim.is_admin);
        assert!(claim.is_individual());
    }

    #[test]
    fn missing_fields_mean_plain_donor() {
        let claim = profile(json!({"username": "asha"}));
        assert!(!claim.is_admin);
        assert_eq!(claim.home(), USER_DASHBOARD);
    }

    #[test]
    fn home_follows_the_strongest_role() {
        assert_eq!(profile(json!({"is_admin": true})).home(), ADMIN_DASHBOARD);
        assert_eq!(profile(json!({"role": "Restaurant"})).home(), ORG_DASHBOARD);
        assert_eq!(profile(json!({"role": "Individual"})).home(), USER_DASHBOARD);

        let ngo = RoleClaim::from_probe(ClaimSource::NgoProfile, &json!({"name": "Hope"}));
        assert_eq!(ngo.home(), NGO_DASHBOARD);
        assert_eq!(ngo.username.as_deref(), Some("Hope"));
    }

    #[test]
    fn organization_predicate_rejects_individuals_only() {
        let predicate = policy_for(ShellKind::Organization).predicate;
        assert!(!predicate.holds(&profile(json!({"role": "Individual"}))));
        assert!(predicate.holds(&profile(json!({"role": "Hotel"}))));
        assert!(predicate.holds(&profile(json!({}))));
    }

    #[test]
    fn admin_predicate_needs_the_flag() {
        let predicate = policy_for(ShellKind::Admin).predicate;
        assert!(!predicate.holds(&profile(json!({"is_admin": false}))));
        assert!(predicate.holds(&profile(json!({"is_admin": true}))));
    }

    #[test]
    fn blank_required_fields_are_named() {
        let err = Credentials::new("asha", "  ").validate().unwrap_err();
        assert!(matches!(err, AuthError::MissingField("password")));

        let org = OrgRegistration {
            business_name: "Annapurna Mess".into(),
            email: "mess@example.org".into(),
            password: "pw".into(),
            role: "Mess".into(),
            fssai_license: String::new(),
            address: "MG Road".into(),
            phone_number: "98450".into(),
        };
        assert!(matches!(org.validate(), Err(AuthError::MissingField("fssai_license"))));
    }

    #[test]
    fn ngo_forms_are_multipart() {
        let form = NgoCredentials {
            email: "hope@ngo.org".into(),
            password: "pw".into(),
        };
        assert!(matches!(form.body(), RequestBody::Multipart(_)));
        assert_eq!(form.body().field("email"), Some("hope@ngo.org"));
    }

    #[test]
    fn reset_requires_matching_passwords() {
        let mut reset = PasswordReset {
            token: "t0k".into(),
            new_password: "new-secret".into(),
            confirm_password: "new-secreT".into(),
        };
        assert!(matches!(reset.validate(), Err(AuthError::PasswordMismatch)));

        reset.confirm_password = "new-secret".into();
        assert!(reset.validate().is_ok());
        assert_eq!(reset.body().field("confirm_password"), None);
    }
}
