use super::*;
use serde_json::json;

#[test]
fn company_statuses_pairs_companies_with_active_subscriptions() {
    let empresas: Vec<Empresa> = serde_json::from_value(json!([
        { "id": 1, "nombre": "Beta" },
        { "id": 2, "nombre": "Alfa" },
        { "id": 3, "nombre": "Gamma" }
    ]))
    .expect("empresas");
    let suscripciones: Vec<Suscripcion> = serde_json::from_value(json!([
        { "id": 10, "empresa_id": 3, "estado": "activa" },
        { "id": 11, "empresa_id": 1, "estado": "cancelada" },
        { "id": 12, "empresa_id": "1", "estado": "activa" }
    ]))
    .expect("suscripciones");

    let rows = company_statuses(&empresas, &suscripciones);

    assert_eq!(
        rows,
        vec![
            CompanyStatus { empresa: "Beta".into(), activa: true },
            CompanyStatus { empresa: "Gamma".into(), activa: true },
            CompanyStatus { empresa: "Alfa".into(), activa: false },
        ]
    );
}

#[test]
fn tally_latest_counts_states_case_insensitively() {
    let rows: Vec<LatestSubscription> = serde_json::from_value(json!([
        { "empresa_nombre": "Alfa", "estado": "Activa" },
        { "empresa_nombre": "Beta", "estado": "inactiva" },
        { "empresa_nombre": "Gamma", "estado": "pendiente" },
        { "empresa_nombre": "Delta" }
    ]))
    .expect("latest");

    assert_eq!(tally_latest(&rows), SubscriptionTally { activas: 1, inactivas: 1, otras: 2 });
}

#[test]
fn monthly_rows_sort_by_period_and_drop_incomplete_rows() {
    let rows: Vec<MonthlySubscriptions> = serde_json::from_value(json!([
        { "anio": 2026, "mes": 10, "total_suscripciones": 3, "total_ingresos": "450" },
        { "anio": "2025", "mes": "12", "total_suscripciones": "1" },
        { "mes": 1, "total_suscripciones": 9 }
    ]))
    .expect("monthly");

    let out = monthly_rows(rows);

    assert_eq!(
        out,
        vec![
            MonthlyRow { periodo: "2025-12".into(), suscripciones: 1, ingresos: 0.0 },
            MonthlyRow { periodo: "2026-10".into(), suscripciones: 3, ingresos: 450.0 },
        ]
    );
}
