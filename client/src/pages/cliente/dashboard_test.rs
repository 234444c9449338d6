use super::*;
use serde_json::json;

#[test]
fn locker_counts_splits_active_and_assigned() {
    let lockers: Vec<Locker> = serde_json::from_value(json!([
        { "id": 1, "estado": "activo", "usuario_id": 4 },
        { "id": 2, "estado": "activo" },
        { "id": 3, "estado": "mantenimiento", "usuario_id": "9" },
        { "id": 4 }
    ]))
    .expect("lockers");
    assert_eq!(locker_counts(&lockers), (2, 2));
}
