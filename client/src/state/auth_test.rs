use super::*;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use session::{MemoryStore, SessionContext, SessionStore};

fn token(claims: &serde_json::Value) -> String {
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.sig")
}

fn handle(store: Arc<MemoryStore>) -> AuthHandle {
    let manager = AuthManager::new(SessionContext::headless(store));
    AuthHandle::new(manager, RwSignal::new(AuthSnapshot::default()))
}

#[test]
fn snapshot_defers_guard_until_loaded() {
    let snapshot = AuthSnapshot::default();
    assert!(snapshot.loading);
    assert_eq!(snapshot.decide("/admin/dashboard"), None);

    let settled = AuthSnapshot::settled(&AuthState::default());
    assert_eq!(settled.decide("/admin/dashboard"), Some(GuardDecision::Redirect(routes::LOGIN)));
    assert_eq!(settled.decide("/login"), Some(GuardDecision::Render));
}

#[test]
fn initialize_settles_the_mirror() {
    let owner = Owner::new();
    owner.with(|| {
        let store = Arc::new(MemoryStore::with_token(&token(&serde_json::json!({ "sub": "42", "rol_id": 2, "empresa_id": 7 }))));
        let auth = handle(store);

        auth.initialize();

        let snapshot = auth.snapshot().get_untracked();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.company_id(), Some(7));
        assert_eq!(snapshot.decide("/cliente/dashboard"), Some(GuardDecision::Render));
        assert_eq!(snapshot.decide("/admin/dashboard"), Some(GuardDecision::Redirect(routes::LOGIN)));
    });
}

#[test]
fn sign_in_returns_landing_route() {
    let owner = Owner::new();
    owner.with(|| {
        let auth = handle(Arc::new(MemoryStore::new()));
        let landing = auth.sign_in(&token(&serde_json::json!({ "sub": "1", "rol": "superadmin" })));
        assert_eq!(landing, Ok(routes::ADMIN_DASHBOARD));
        assert_eq!(
            auth.snapshot().get_untracked().profile().map(|p| p.role),
            Some("superadmin".to_owned())
        );
    });
}

#[test]
fn sign_in_with_employee_role_discards_session() {
    let owner = Owner::new();
    owner.with(|| {
        let store = Arc::new(MemoryStore::new());
        let auth = handle(store.clone());

        let err = auth.sign_in(&token(&serde_json::json!({ "sub": "9", "rol_id": 3 }))).expect_err("employee");

        assert_eq!(err, AuthError::UnauthorizedRole);
        assert_eq!(sign_in_error_message(&err), "Rol no autorizado para ingresar.");
        assert_eq!(store.read(), None);
        assert!(auth.snapshot().get_untracked().identity.is_none());
    });
}

#[test]
fn sign_out_clears_mirror() {
    let owner = Owner::new();
    owner.with(|| {
        let store = Arc::new(MemoryStore::new());
        let auth = handle(store.clone());
        auth.sign_in(&token(&serde_json::json!({ "sub": "2", "rol_id": 2 }))).expect("sign in");

        auth.sign_out();

        assert_eq!(store.read(), None);
        assert_eq!(auth.snapshot().get_untracked(), AuthSnapshot { identity: None, loading: false });
    });
}
