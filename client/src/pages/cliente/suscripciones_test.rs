use super::*;
use serde_json::json;

fn plans() -> Vec<Plan> {
    serde_json::from_value(json!([
        { "id": 1, "nombre": "Básico", "costo": 499, "lockers": 5, "limite_usuarios": 3 },
        { "id": 2, "nombre": "Pro", "costo": "1299.9" }
    ]))
    .expect("plans")
}

#[test]
fn current_plan_follows_active_subscription() {
    let activa: Suscripcion =
        serde_json::from_value(json!({ "id": 9, "empresa_id": 7, "plan_id": 2, "estado": "activa" })).expect("sub");
    let view = SubscriptionView { activa: Some(activa), planes: plans() };
    assert_eq!(view.current_plan().map(|p| p.nombre.as_str()), Some("Pro"));

    let none = SubscriptionView { activa: None, planes: plans() };
    assert_eq!(none.current_plan(), None);
}

#[test]
fn plan_summary_lists_limits() {
    let planes = plans();
    assert_eq!(plan_summary(&planes[0]), "$499.00 · 5 lockers · 3 usuarios");
    assert_eq!(plan_summary(&planes[1]), "$1,299.90 · lockers ilimitados · usuarios ilimitados");
}
