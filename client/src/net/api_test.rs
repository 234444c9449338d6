use super::*;
use std::collections::VecDeque;
use std::sync::Mutex;

use futures::executor::block_on;
use session::{ApiRequest, ApiResponse, ApiRoot, MemoryStore, Method, TransportError};

/// Replays canned `(status, body)` pairs and records requests.
#[derive(Default)]
struct FakeTransport {
    responses: Mutex<VecDeque<(u16, String)>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    fn replying(responses: &[(u16, &str)]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|(s, b)| (*s, (*b).to_owned())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().expect("lock").push(request);
        let (status, body) = self
            .responses
            .lock()
            .expect("lock")
            .pop_front()
            .ok_or_else(|| TransportError("unexpected request".to_owned()))?;
        Ok(ApiResponse { status, body })
    }
}

fn client(responses: &[(u16, &str)]) -> ApiClient<FakeTransport> {
    let root = ApiRoot::resolve(Some("http://backend.test"), None).expect("root");
    let context = SessionContext::headless(Arc::new(MemoryStore::new()));
    ApiClient::new(root, context, FakeTransport::replying(responses))
}

fn sent(api: &ApiClient<FakeTransport>) -> Vec<ApiRequest> {
    api.transport().requests.lock().expect("lock").clone()
}

#[test]
fn login_posts_credentials_and_returns_token() {
    let api = client(&[(200, r#"{"usuario":{"token":"h.p.s","nombre":"Luz"}}"#)]);

    let token = block_on(login(&api, "luz@example.com", "secreta")).expect("login");

    assert_eq!(token, "h.p.s");
    let requests = sent(&api);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, "http://backend.test/api/usuarios/login");
    assert_eq!(requests[0].body, Some(json!({ "correo": "luz@example.com", "contraseña": "secreta" })));
}

#[test]
fn login_without_token_is_missing_token() {
    let api = client(&[(200, r#"{"usuario":{}}"#)]);
    assert_eq!(block_on(login(&api, "a@b.c", "x")), Err(ApiError::MissingToken));
}

#[test]
fn login_surfaces_server_message() {
    let api = client(&[(400, r#"{"message":"Credenciales inválidas"}"#)]);
    let err = block_on(login(&api, "a@b.c", "x")).expect_err("rejected");
    assert_eq!(err.user_message(), "Credenciales inválidas");
}

#[test]
fn google_login_sends_credential_as_token() {
    let api = client(&[(200, r#"{"usuario":{"token":"g.t.s"}}"#)]);
    assert_eq!(block_on(google_login(&api, "cred")).expect("login"), "g.t.s");
    assert_eq!(sent(&api)[0].body, Some(json!({ "token": "cred" })));
    assert!(sent(&api)[0].url.ends_with("/usuarios/google-login"));
}

#[test]
fn logout_ignores_backend_failure() {
    let api = client(&[(500, "")]);
    block_on(logout(&api));
    assert_eq!(sent(&api).len(), 1);
}

#[test]
fn fetch_employees_filters_by_role_and_company() {
    let api = client(&[(200, r#"{"data":[{"id":4,"nombre":"Eva","rol_id":3,"empresa_id":7}]}"#)]);

    let employees = block_on(fetch_employees(&api, 7)).expect("employees");

    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].nombre, "Eva");
    assert_eq!(
        sent(&api)[0].query,
        vec![("rol_id".to_owned(), "3".to_owned()), ("empresa_id".to_owned(), "7".to_owned())]
    );
}

#[test]
fn subscription_status_treats_empty_body_as_inactive() {
    let api = client(&[(200, "")]);
    assert_eq!(block_on(subscription_status(&api, 7)).expect("status"), SubscriptionStatus::default());
}

#[test]
fn active_subscription_matches_company_and_state() {
    let api = client(&[
        (200, r#"{"activa":true}"#),
        (
            200,
            r#"[{"id":1,"empresa_id":7,"estado":"cancelada"},{"id":2,"empresa_id":8,"estado":"activa"},{"id":3,"empresa_id":"7","estado":"activa","plan_id":2}]"#,
        ),
    ]);

    let active = block_on(active_subscription(&api, 7)).expect("ok").expect("active");

    assert_eq!(active.id, 3);
    assert_eq!(active.plan_id, Some(2));
}

#[test]
fn active_subscription_skips_list_when_status_inactive() {
    let api = client(&[(200, r#"{"activa":false}"#)]);
    assert_eq!(block_on(active_subscription(&api, 7)).expect("ok"), None);
    assert_eq!(sent(&api).len(), 1);
}

#[test]
fn total_income_defaults_to_zero() {
    let api = client(&[(200, r#"{"ingresos_totales":"1500.5"}"#), (200, "{}")]);
    assert!((block_on(total_income(&api)).expect("total") - 1500.5).abs() < f64::EPSILON);
    assert!(block_on(total_income(&api)).expect("total").abs() < f64::EPSILON);
}

#[test]
fn income_reports_forward_date_range() {
    let api = client(&[
        (200, r#"[{"empresa":"Alfa","ingresos":"1200.50"},{"empresa_nombre":"Beta","ingresos":300}]"#),
        (200, r#"{"ingresos_totales":1500.5}"#),
    ]);

    let rows = block_on(incomes_by_company(&api, "2026-10-01", "2026-10-31")).expect("rows");
    let total = block_on(income_total_between(&api, "2026-10-01", "2026-10-31")).expect("total");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].ingresos, Some(1200.5));
    assert_eq!(rows[1].empresa, "Beta");
    assert!((total - 1500.5).abs() < f64::EPSILON);
    let requests = sent(&api);
    assert!(requests[0].url.ends_with("/reports/ingresos/por-empresa"));
    assert!(requests[1].url.ends_with("/reports/ingresos/totales-por-fecha"));
    for request in &requests {
        assert_eq!(
            request.query,
            vec![("fecha_inicio".to_owned(), "2026-10-01".to_owned()), ("fecha_fin".to_owned(), "2026-10-31".to_owned())]
        );
    }
}

#[test]
fn income_total_between_treats_empty_body_as_zero() {
    let api = client(&[(200, "")]);
    assert!(block_on(income_total_between(&api, "2026-01-01", "2026-01-31")).expect("total").abs() < f64::EPSILON);
}

#[test]
fn monthly_income_reads_month_labels() {
    let api = client(&[(200, r#"[{"mes":"2026-09","ingresos":"80"},{"mes":10,"ingresos":null}]"#)]);

    let rows = block_on(monthly_income(&api)).expect("rows");

    assert_eq!(rows[0].mes.as_deref(), Some("2026-09"));
    assert_eq!(rows[0].ingresos, Some(80.0));
    assert_eq!(rows[1].mes.as_deref(), Some("10"));
    assert_eq!(rows[1].ingresos, None);
    assert!(sent(&api)[0].url.ends_with("/reports/ingresos/mensuales"));
}

#[test]
fn subscription_stats_hit_their_endpoints() {
    let api = client(&[
        (200, r#"{"data":[{"empresa_id":"7","empresa_nombre":"Alfa","estado":"activa","fecha_fin":"2026-12-01"}]}"#),
        (200, r#"[{"anio":2026,"mes":"9","total_suscripciones":"4","total_ingresos":"1999.9"}]"#),
    ]);

    let latest = block_on(latest_subscriptions(&api)).expect("latest");
    let monthly = block_on(monthly_subscriptions(&api)).expect("monthly");

    assert_eq!(latest[0].empresa_id, Some(7));
    assert_eq!(latest[0].estado.as_deref(), Some("activa"));
    assert_eq!(monthly[0].period().as_deref(), Some("2026-09"));
    assert_eq!(monthly[0].total_suscripciones, Some(4));
    let requests = sent(&api);
    assert!(requests[0].url.ends_with("/suscripciones/ultimas"));
    assert!(requests[1].url.ends_with("/suscripciones/mensuales"));
}

#[test]
fn update_usuario_puts_form_without_blank_password() {
    let api = client(&[(200, "{}")]);
    let form = UsuarioForm {
        nombre: "Eva".to_owned(),
        correo: "eva@example.com".to_owned(),
        contrasena: None,
        rol_id: Some(EMPLOYEE_ROLE_ID),
        empresa_id: Some(7),
    };

    block_on(update_usuario(&api, "4", &form)).expect("update");

    let request = &sent(&api)[0];
    assert_eq!(request.method, Method::Put);
    assert!(request.url.ends_with("/usuarios/4"));
    assert_eq!(request.body, Some(json!({ "nombre": "Eva", "correo": "eva@example.com", "rol_id": 3, "empresa_id": 7 })));
}

#[test]
fn assign_locker_sends_nullable_user() {
    let api = client(&[(200, "{}"), (200, "{}")]);
    block_on(assign_locker(&api, 5, Some(9))).expect("assign");
    block_on(assign_locker(&api, 5, None)).expect("unassign");
    let requests = sent(&api);
    assert_eq!(requests[0].method, Method::Put);
    assert_eq!(requests[0].body, Some(json!({ "usuario_id": 9 })));
    assert_eq!(requests[1].body, Some(json!({ "usuario_id": null })));
}

#[test]
fn backend_with_refused_root_reports_config_error() {
    let root = ApiRoot::resolve(Some("http://localhost:5000"), Some("https://app.bodegix.mx"));
    let backend = Backend::new(root, SessionContext::headless(Arc::new(MemoryStore::new())));
    let err = backend.client().err().expect("config error");
    assert!(matches!(err, ApiError::Config(_)));
    assert!(err.user_message().contains("localhost"));
}
