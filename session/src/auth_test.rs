use super::*;
use crate::guard::{self, GuardDecision};
use crate::role::{AllowedRoles, RoleRef};
use crate::store::SessionStore;
use crate::test_helpers::{TestRig, make_token};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

// =============================================================================
// initialize
// =============================================================================

#[test]
fn initialize_without_token_is_logged_out() {
    let rig = TestRig::new();
    let auth = AuthManager::new(rig.context.clone());
    auth.initialize();
    assert_eq!(auth.snapshot(), AuthState::default());
}

#[test]
fn initialize_restores_identity_from_store() {
    let rig = TestRig::with_token(&make_token(&json!({ "sub": "42", "rol_id": 2, "empresa_id": 7 })));
    let auth = AuthManager::new(rig.context.clone());
    auth.initialize();

    let identity = auth.identity().expect("identity restored");
    assert_eq!(identity.subject_id, "42");
    assert_eq!(identity.company_id, Some(7));
}

#[test]
fn initialize_discards_malformed_token() {
    let rig = TestRig::with_token("garbage");
    let auth = AuthManager::new(rig.context.clone());
    auth.initialize();

    assert!(!auth.snapshot().is_authenticated());
    assert_eq!(rig.store.read(), None);
}

#[test]
fn initialize_is_idempotent() {
    let rig = TestRig::with_token(&make_token(&json!({ "sub": "5", "rol": "superadmin" })));
    let auth = AuthManager::new(rig.context.clone());
    auth.initialize();
    let first = auth.snapshot();
    auth.initialize();
    assert_eq!(auth.snapshot(), first);
    assert!(first.is_authenticated());
}

// =============================================================================
// login / logout
// =============================================================================

#[test]
fn login_is_visible_to_guard_immediately() {
    let rig = TestRig::new();
    let auth = AuthManager::new(rig.context.clone());
    auth.initialize();

    auth.login(&make_token(&json!({ "sub": "1", "rol_id": 1 }))).expect("login");

    let allowed = AllowedRoles::new(vec![RoleRef::from(1)]);
    assert_eq!(guard::check(auth.snapshot().identity(), &allowed), GuardDecision::Render);
}

#[test]
fn login_persists_token() {
    let rig = TestRig::new();
    let auth = AuthManager::new(rig.context.clone());
    let token = make_token(&json!({ "sub": "1" }));
    auth.login(&token).expect("login");
    assert_eq!(rig.store.read(), Some(token));
}

#[test]
fn login_with_malformed_token_propagates_and_leaves_no_state() {
    let rig = TestRig::new();
    let auth = AuthManager::new(rig.context.clone());

    let err = auth.login("not-a-token").expect_err("login should fail");
    assert_eq!(err, AuthError::Malformed(MalformedTokenError::SegmentCount(1)));
    assert_eq!(rig.store.read(), None);
    assert!(auth.identity().is_none());
}

#[test]
fn failed_login_clears_previous_session() {
    let rig = TestRig::new();
    let auth = AuthManager::new(rig.context.clone());
    auth.login(&make_token(&json!({ "sub": "1", "rol_id": 2 }))).expect("login");

    assert!(auth.login("a.b").is_err());
    assert!(auth.identity().is_none());
    assert_eq!(rig.store.read(), None);
}

#[test]
fn logout_clears_store_and_identity() {
    let rig = TestRig::new();
    let auth = AuthManager::new(rig.context.clone());
    auth.login(&make_token(&json!({ "sub": "1", "rol_id": 2 }))).expect("login");

    auth.logout();
    assert!(auth.identity().is_none());
    assert_eq!(rig.store.read(), None);

    auth.initialize();
    assert!(!auth.snapshot().is_authenticated());
}

#[test]
fn login_rearms_session_expiry_notice() {
    let rig = TestRig::new();
    let auth = AuthManager::new(rig.context.clone());
    assert!(rig.context.expire_session());
    assert!(!rig.context.expire_session());

    auth.login(&make_token(&json!({ "sub": "1" }))).expect("login");
    assert!(rig.context.expire_session());
}

#[test]
fn subscribers_observe_every_mutation_synchronously() {
    let rig = TestRig::new();
    let auth = AuthManager::new(rig.context.clone());
    let calls = Arc::new(AtomicUsize::new(0));
    let seen_auth = Arc::new(Mutex::new(Vec::new()));

    let calls_sub = calls.clone();
    let seen_sub = seen_auth.clone();
    auth.subscribe(move |state| {
        calls_sub.fetch_add(1, Ordering::SeqCst);
        seen_sub.lock().expect("lock").push(state.is_authenticated());
    });

    auth.initialize();
    auth.login(&make_token(&json!({ "sub": "1" }))).expect("login");
    auth.logout();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(*seen_auth.lock().expect("lock"), vec![false, true, false]);
}

// =============================================================================
// landing route / profile
// =============================================================================

#[test]
fn landing_route_by_role() {
    let rig = TestRig::new();
    let auth = AuthManager::new(rig.context.clone());

    assert_eq!(auth.landing_route(), Err(AuthError::UnauthorizedRole));

    auth.login(&make_token(&json!({ "sub": "1", "rol": "superadmin" }))).expect("login");
    assert_eq!(auth.landing_route(), Ok(routes::ADMIN_DASHBOARD));

    auth.login(&make_token(&json!({ "sub": "2", "rol_id": 2 }))).expect("login");
    assert_eq!(auth.landing_route(), Ok(routes::CLIENT_DASHBOARD));

    auth.login(&make_token(&json!({ "sub": "3", "rol_id": 3 }))).expect("login");
    assert_eq!(auth.landing_route(), Err(AuthError::UnauthorizedRole));
}

#[test]
fn profile_applies_fallbacks() {
    let rig = TestRig::new();
    let auth = AuthManager::new(rig.context.clone());
    assert!(auth.profile().is_none());

    auth.login(&make_token(&json!({ "sub": "1" }))).expect("login");
    let profile = auth.profile().expect("profile");
    assert_eq!(profile.name, "Usuario");
    assert_eq!(profile.company, "Empresa");
    assert_eq!(profile.role, "Cliente");

    auth.login(&make_token(&json!({
        "sub": "1",
        "nombre": "Luz",
        "empresa_nombre": "Norte",
        "rol_nombre": "cliente"
    })))
    .expect("login");
    let profile = auth.profile().expect("profile");
    assert_eq!(profile, Profile { name: "Luz".into(), company: "Norte".into(), role: "cliente".into() });
}

// =============================================================================
// scenarios
// =============================================================================

#[test]
fn client_login_scenario_routes_by_role() {
    let rig = TestRig::new();
    let auth = AuthManager::new(rig.context.clone());
    auth.initialize();
    auth.login(&make_token(&json!({ "sub": "42", "rol_id": 2, "empresa_id": 7 }))).expect("login");

    let state = auth.snapshot();
    assert_eq!(routes::resolve("/cliente/dashboard", state.identity()), GuardDecision::Render);
    assert_eq!(routes::resolve("/admin/dashboard", state.identity()), GuardDecision::Redirect(routes::LOGIN));
}

#[test]
fn empty_storage_scenario_redirects_everywhere() {
    let rig = TestRig::new();
    let auth = AuthManager::new(rig.context.clone());
    auth.initialize();

    let state = auth.snapshot();
    for route in routes::PROTECTED {
        assert_eq!(routes::resolve(route.path, state.identity()), GuardDecision::Redirect(routes::LOGIN));
    }
}
