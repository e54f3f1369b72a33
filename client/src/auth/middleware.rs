//! Session guard protecting role-scoped areas.
//!
//! A guard is configured with one row of the policy table. Each mount issues a
//! single probe through the gateway, publishes `Checking` until that probe
//! settles, then moves to exactly one terminal state: `Authorized` when the
//! predicate holds, `Redirecting` otherwise. Nothing is cached between mounts.

use mealmitra_adapters::ApiClient;
use tokio::sync::watch;
use tracing::{info, warn};

use super::models::{RoleClaim, RolePolicy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authorized(RoleClaim),
    Redirecting(String),
}

impl GuardState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, GuardState::Checking)
    }
}

#[derive(Clone)]
pub struct SessionGuard {
    client: ApiClient,
    policy: &'static RolePolicy,
}

impl SessionGuard {
    pub fn new(client: ApiClient, policy: &'static RolePolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> &'static RolePolicy {
        self.policy
    }

    /// Runs one probe and decides. Never returns `Checking`.
    pub async fn evaluate(&self) -> GuardState {
        let Some(probe) = self.policy.probe else {
            return GuardState::Authorized(RoleClaim::anonymous());
        };

        match self.client.get(probe.path).await {
            Ok(response) => {
                let claim = RoleClaim::from_probe(probe.source, &response.body);
                if self.policy.predicate.holds(&claim) {
                    info!("{} area: access granted", self.policy.shell);
                    GuardState::Authorized(claim)
                } else {
                    let home = claim.home();
                    info!(
                        "{} area: role mismatch, sending caller home to {home}",
                        self.policy.shell
                    );
                    GuardState::Redirecting(home.to_string())
                }
            }
            Err(err) => {
                warn!(
                    "{} area: session check failed ({err}), redirecting to {}",
                    self.policy.shell, self.policy.login_entry
                );
                GuardState::Redirecting(self.policy.login_entry.to_string())
            }
        }
    }

    /// Starts the probe in the background and hands back the observable state.
    pub fn mount(&self) -> GuardMount {
        let (tx, rx) = watch::channel(GuardState::Checking);
        let guard = self.clone();

        tokio::spawn(async move {
            let outcome = guard.evaluate().await;
            // The mount may already be gone; its late result is dropped.
            let _ = tx.send(outcome);
        });

        GuardMount {
            state: rx,
            login_entry: self.policy.login_entry,
        }
    }
}

/// One mount of a guard: the state its in-flight probe will settle into.
pub struct GuardMount {
    state: watch::Receiver<GuardState>,
    login_entry: &'static str,
}

impl GuardMount {
    pub fn state(&self) -> GuardState {
        self.state.borrow().clone()
    }

    pub async fn settled(mut self) -> GuardState {
        match self.state.wait_for(GuardState::is_settled).await {
            Ok(state) => state.clone(),
            // The probe task died without deciding; treat it like a failed probe.
            Err(_) => GuardState::Redirecting(self.login_entry.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mealmitra_adapters::{Method, ScriptedTransport};
    use serde_json::json;

    use super::*;
    use crate::auth::models::{policy_for, ShellKind};

    fn guard(shell: ShellKind, transport: Arc<ScriptedTransport>) -> SessionGuard {
        SessionGuard::new(ApiClient::new(transport), policy_for(shell))
    }

    #[tokio::test]
    async fn public_area_is_open_without_probing() {
        let transport = Arc::new(ScriptedTransport::new());
        let state = guard(ShellKind::Public, transport.clone()).evaluate().await;

        assert_eq!(state, GuardState::Authorized(RoleClaim::anonymous()));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn ngo_without_profile_goes_to_ngo_login() {
        let transport = Arc::new(ScriptedTransport::new().on(
            Method::Get,
            "/ngo/profile",
            401,
            json!({"detail": "Not an NGO session"}),
        ));
        let state = guard(ShellKind::Ngo, transport).evaluate().await;
        assert_eq!(state, GuardState::Redirecting("/ngo/login".to_string()));
    }

    #[tokio::test]
    async fn individual_in_organization_area_goes_home() {
        let transport = Arc::new(ScriptedTransport::new().on(
            Method::Get,
            "/profile",
            200,
            json!({"user": {"id": 2, "username": "asha", "role": "Individual"}}),
        ));
        let state = guard(ShellKind::Organization, transport).evaluate().await;
        assert_eq!(state, GuardState::Redirecting("/user/dashboard".to_string()));
    }

    #[tokio::test]
    async fn mount_starts_in_checking() {
        let (transport, gate) = ScriptedTransport::new()
            .on(Method::Get, "/profile", 200, json!({"user": {"is_admin": true}}))
            .gated();
        let mount = guard(ShellKind::Admin, Arc::new(transport)).mount();

        assert_eq!(mount.state(), GuardState::Checking);
        gate.open();
        assert!(matches!(mount.settled().await, GuardState::Authorized(_)));
    }
}
