use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use mealmitra_adapters::{ApiClient, Method, ScriptedTransport};
use mealmitra_client::{
    auth::{
        middleware::{GuardState, SessionGuard},
        models::{ShellKind, ROLE_POLICIES},
    },
    navigator::History,
    routes::Page,
    services::{
        navigation::SideNav,
        identity::IdentityLabel,
        shell::{AuthTab, RoleShell, ShellPhase, ShellView},
    },
    App, ClientConfig,
};
use serde_json::json;

fn shell(kind: ShellKind, transport: Arc<ScriptedTransport>) -> (RoleShell, Arc<History>) {
    let history = Arc::new(History::new());
    let shell = RoleShell::new(kind, ApiClient::new(transport), history.clone());
    (shell, history)
}

fn app(transport: ScriptedTransport) -> App {
    App::with_client(ApiClient::new(Arc::new(transport)), ClientConfig::default())
}

#[tokio::test]
async fn anonymous_admin_visit_goes_home_without_mounting_content() {
    let transport = Arc::new(ScriptedTransport::new().on(
        Method::Get,
        "/profile",
        401,
        json!({"detail": "Not authenticated"}),
    ));
    let (admin, history) = shell(ShellKind::Admin, transport);
    let rendered = AtomicUsize::new(0);

    let view = admin
        .enter(|_, _| {
            rendered.fetch_add(1, Ordering::SeqCst);
        })
        .await;

    assert_eq!(view.redirect_target(), Some("/"));
    assert_eq!(history.entries(), vec!["/"]);
    assert_eq!(rendered.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_admin_is_sent_to_user_dashboard() {
    let transport = Arc::new(ScriptedTransport::new().on(
        Method::Get,
        "/profile",
        200,
        json!({"user": {"id": 5, "username": "asha", "is_admin": false}}),
    ));
    let (admin, history) = shell(ShellKind::Admin, transport);

    let view = admin.enter(|_, _| "console").await;

    assert_eq!(view.redirect_target(), Some("/user/dashboard"));
    assert_eq!(history.current().as_deref(), Some("/user/dashboard"));
}

#[tokio::test]
async fn ngo_session_renders_with_exactly_the_ngo_menu() {
    let transport = Arc::new(ScriptedTransport::new().on(
        Method::Get,
        "/ngo/profile",
        200,
        json!({"name": "Hope Foundation", "registration_status": "verified"}),
    ));
    let (ngo, history) = shell(ShellKind::Ngo, transport);

    let view = ngo.enter(|_, claim| claim.has_ngo_profile).await;

    let ShellView::Ready(frame) = view else {
        panic!("NGO shell should render");
    };
    assert!(frame.content);
    assert_eq!(
        frame.top_bar.identity.resolved().await.text(),
        "Hope Foundation"
    );

    let destinations: Vec<_> = frame
        .side_nav
        .as_ref()
        .map(|nav| nav.entries.iter().map(|entry| entry.destination).collect())
        .unwrap_or_default();
    assert_eq!(
        destinations,
        vec!["/ngo/dashboard", "/ngo/claim", "/ngo/donations", "/ngo/profile"]
    );
    assert_eq!(frame.side_nav, SideNav::for_shell(ShellKind::Ngo));
    assert!(history.entries().is_empty());
}

#[tokio::test]
async fn loading_comes_before_authorization() {
    let (transport, gate) = ScriptedTransport::new()
        .on(Method::Get, "/profile", 200, json!({"user": {"username": "asha"}}))
        .gated();
    let (individual, _) = shell(ShellKind::Individual, Arc::new(transport));
    let rendered = AtomicUsize::new(0);

    let mount = individual.mount();
    assert_eq!(mount.phase(), ShellPhase::Loading);
    assert_eq!(rendered.load(Ordering::SeqCst), 0);

    gate.open();
    let view = mount
        .render(|_, _| {
            rendered.fetch_add(1, Ordering::SeqCst);
        })
        .await;

    assert!(view.redirect_target().is_none());
    assert_eq!(rendered.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn every_entry_probes_again() {
    let transport = Arc::new(ScriptedTransport::new().on(
        Method::Get,
        "/profile",
        200,
        json!({"user": {"username": "ravi", "is_admin": true}}),
    ));
    let (admin, _) = shell(ShellKind::Admin, transport.clone());

    let first = admin.enter(|_, claim| claim.is_admin).await;
    let second = admin.enter(|_, claim| claim.is_admin).await;

    for view in [first, second] {
        let ShellView::Ready(frame) = view else {
            panic!("admin shell should render");
        };
        assert!(frame.content);
        assert_eq!(frame.top_bar.identity.resolved().await.text(), "ravi");
    }
    // One probe and one identity read per entry.
    assert_eq!(transport.count(Method::Get, "/profile"), 4);
}

#[tokio::test]
async fn session_expiry_between_entries_is_noticed() {
    let transport = Arc::new(ScriptedTransport::new().on(
        Method::Get,
        "/profile",
        200,
        json!({"user": {"username": "asha"}}),
    ));
    let (individual, history) = shell(ShellKind::Individual, transport.clone());

    assert!(individual.enter(|_, _| ()).await.redirect_target().is_none());

    transport.set_reply(Method::Get, "/profile", 401, json!({"detail": "Session expired"}));
    let view = individual.enter(|_, _| ()).await;

    assert_eq!(view.redirect_target(), Some("/login"));
    assert_eq!(history.current().as_deref(), Some("/login"));
}

#[tokio::test]
async fn logout_lands_on_root_even_when_the_call_fails() {
    let transport = Arc::new(ScriptedTransport::new().unreachable(Method::Post, "/logout"));
    let (organization, history) = shell(ShellKind::Organization, transport.clone());

    let notice = organization.logout().await;

    assert!(notice.is_error());
    assert_eq!(history.entries(), vec!["/"]);
    assert_eq!(transport.count(Method::Post, "/logout"), 1);
}

#[tokio::test]
async fn public_content_can_open_the_auth_dialog() {
    let (public, _) = shell(ShellKind::Public, Arc::new(ScriptedTransport::new()));

    let view = public
        .enter(|context, _| context.open_auth(AuthTab::Register))
        .await;

    assert!(matches!(view, ShellView::Ready(ref frame) if frame.content));
    assert_eq!(
        public.auth_dialog().and_then(|dialog| dialog.requested()),
        Some(AuthTab::Register)
    );

    let (admin, _) = shell(ShellKind::Admin, Arc::new(ScriptedTransport::new()));
    assert!(!admin.context().can_open_auth());
}

#[tokio::test]
async fn organization_member_visiting_donor_pages_is_allowed() {
    let app = app(ScriptedTransport::new().on(
        Method::Get,
        "/profile",
        200,
        json!({"user": {"id": 9, "username": "annapurna", "role": "Mess"}}),
    ));

    let visit = app.open("/organisation/dashboard").await.unwrap();

    assert_eq!(visit.page(), Page::OrgDashboard);
    let frame = visit.frame().unwrap();
    assert_eq!(frame.top_bar.identity.resolved().await.text(), "annapurna");
    assert_eq!(frame.top_bar.brand_link, "/organisation/dashboard");
}

#[tokio::test]
async fn ngo_without_session_ends_on_standalone_login() {
    let app = app(ScriptedTransport::new());

    let visit = app.open("/ngo/profile").await.unwrap();

    assert_eq!(visit.page(), Page::NgoLogin);
    assert!(visit.frame().is_none());
    assert_eq!(app.history().entries(), vec!["/ngo/profile", "/ngo/login"]);
}

#[tokio::test]
async fn unknown_paths_render_not_found_in_public_shell() {
    let app = app(ScriptedTransport::new());

    let visit = app.open("/ngo/claim").await.unwrap();

    assert_eq!(visit.page(), Page::NotFound);
    assert!(visit.frame().map_or(false, |frame| frame.side_nav.is_none()));
}

#[tokio::test]
async fn hung_identity_lookup_does_not_hold_back_content() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .on(Method::Get, "/profile", 200, json!({"user": {"username": "asha"}}))
            .stalled(Method::Get, "/me"),
    );
    let (individual, history) = shell(ShellKind::Individual, transport.clone());
    let rendered = AtomicUsize::new(0);

    let view = tokio::time::timeout(
        Duration::from_secs(2),
        individual.enter(|_, claim| {
            rendered.fetch_add(1, Ordering::SeqCst);
            claim.username.clone()
        }),
    )
    .await
    .expect("content should render while /me hangs");

    let ShellView::Ready(frame) = view else {
        panic!("individual shell should render");
    };
    assert_eq!(frame.content.as_deref(), Some("asha"));
    assert_eq!(rendered.load(Ordering::SeqCst), 1);
    assert!(!frame.top_bar.identity.is_resolved());
    assert_eq!(frame.top_bar.identity.current(), IdentityLabel::Placeholder("Guest"));
    assert!(history.entries().is_empty());
}

#[tokio::test]
async fn expired_session_sends_every_guarded_shell_to_its_login_entry() {
    for policy in &ROLE_POLICIES {
        let Some(session_check) = policy.probe else {
            // Open areas never check the session, so an expired one changes nothing.
            let client = ApiClient::new(Arc::new(ScriptedTransport::new()));
            let guard = SessionGuard::new(client, policy);
            assert!(matches!(guard.evaluate().await, GuardState::Authorized(_)));
            continue;
        };

        let transport = Arc::new(ScriptedTransport::new().on(
            Method::Get,
            session_check.path,
            401,
            json!({"detail": "Not authenticated"}),
        ));

        let guard = SessionGuard::new(ApiClient::new(transport.clone()), policy);
        assert_eq!(
            guard.evaluate().await,
            GuardState::Redirecting(policy.login_entry.to_string()),
            "{} shell",
            policy.shell
        );

        let (role_shell, history) = shell(policy.shell, transport);
        let view = role_shell.enter(|_, _| ()).await;
        assert_eq!(view.redirect_target(), Some(policy.login_entry), "{} shell", policy.shell);
        assert_eq!(history.entries(), vec![policy.login_entry]);
    }
}
