use super::*;
use serde_json::json;

#[test]
fn active_count_ignores_cancelled_and_unknown_states() {
    let subs: Vec<Suscripcion> = serde_json::from_value(json!([
        { "id": 1, "estado": "activa" },
        { "id": 2, "estado": "cancelada" },
        { "id": 3 },
        { "id": 4, "estado": "ACTIVA" }
    ]))
    .expect("subs");
    assert_eq!(active_count(&subs), 2);
}
