use super::*;
use serde_json::json;

#[test]
fn classify_uses_three_minute_window() {
    assert_eq!(Freshness::classify(None), Freshness::NoData);
    assert_eq!(Freshness::classify(Some(0.5)), Freshness::Ok);
    assert_eq!(Freshness::classify(Some(3.0)), Freshness::Ok);
    assert_eq!(Freshness::classify(Some(3.01)), Freshness::Stale);
    assert_eq!(Freshness::Stale.label(), "DESACTUALIZADO");
}

#[test]
fn age_minutes_rejects_unparsed_dates() {
    assert_eq!(age_minutes(0.0, 120_000.0), Some(2.0));
    assert_eq!(age_minutes(f64::NAN, 120_000.0), None);
}

#[test]
fn sensor_ids_are_zero_padded() {
    assert_eq!(sensor_id("7"), "LOCKER_007");
    assert_eq!(sensor_id("1234"), "LOCKER_1234");
    assert_eq!(display_id("LOCKER_007"), "007");
    assert_eq!(display_id("locker_12"), "12");
    assert_eq!(display_id("A-1"), "A-1");
    assert_eq!(display_id("LOCKER_"), "LOCKER_");
}

#[test]
fn active_readings_keeps_only_active_lockers_sorted() {
    let lockers: Vec<Locker> = serde_json::from_value(json!([
        { "id": 1, "identificador": 2, "estado": "activo" },
        { "id": 2, "identificador": "1", "estado": "activo" },
        { "id": 3, "identificador": 3, "estado": "inactivo" }
    ]))
    .expect("lockers");
    let lecturas: Vec<Lectura> = serde_json::from_value(json!([
        { "locker_id": "LOCKER_003", "temperatura": 5.0 },
        { "locker_id": "LOCKER_002", "temperatura": 4.0 },
        { "locker_id": "LOCKER_001", "temperatura": 3.0 },
        { "temperatura": 9.0 }
    ]))
    .expect("lecturas");

    let ids: Vec<_> = active_readings(&lockers, lecturas).into_iter().filter_map(|r| r.locker_id).collect();

    assert_eq!(ids, vec!["LOCKER_001".to_owned(), "LOCKER_002".to_owned()]);
}
