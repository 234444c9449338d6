use super::*;

fn client() -> Identity {
    Identity {
        subject_id: "42".to_owned(),
        role_name: None,
        role_id: Some(2),
        company_id: Some(7),
        company_name: None,
        display_name: None,
    }
}

fn superadmin() -> Identity {
    Identity {
        subject_id: "1".to_owned(),
        role_name: Some("superadmin".to_owned()),
        role_id: Some(1),
        company_id: None,
        company_name: None,
        display_name: None,
    }
}

#[test]
fn route_table_has_six_views_per_area() {
    assert_eq!(PROTECTED.iter().filter(|r| r.area == Area::Admin).count(), 6);
    assert_eq!(PROTECTED.iter().filter(|r| r.area == Area::Client).count(), 6);
}

#[test]
fn find_ignores_trailing_slash() {
    assert_eq!(find("/cliente/lockers/").map(|r| r.path), Some("/cliente/lockers"));
    assert!(find("/cliente/unknown").is_none());
}

#[test]
fn client_reaches_client_tree_only() {
    let who = client();
    assert_eq!(resolve(CLIENT_DASHBOARD, Some(&who)), GuardDecision::Render);
    assert_eq!(resolve(ADMIN_DASHBOARD, Some(&who)), GuardDecision::Redirect(LOGIN));
}

#[test]
fn superadmin_reaches_admin_tree_only() {
    let who = superadmin();
    assert_eq!(resolve("/admin/reports", Some(&who)), GuardDecision::Render);
    assert_eq!(resolve(SUBSCRIPTIONS, Some(&who)), GuardDecision::Redirect(LOGIN));
}

#[test]
fn anonymous_is_sent_to_login_everywhere() {
    for route in PROTECTED {
        assert_eq!(resolve(route.path, None), GuardDecision::Redirect(LOGIN), "{}", route.path);
    }
    assert_eq!(resolve(LOGIN, None), GuardDecision::Render);
}

#[test]
fn unknown_paths_fall_through_to_login() {
    assert_eq!(resolve("/nope", Some(&superadmin())), GuardDecision::Redirect(LOGIN));
    assert_eq!(resolve("/", Some(&client())), GuardDecision::Redirect(LOGIN));
}

#[test]
fn menu_lists_only_the_callers_tree() {
    let labels: Vec<&str> = menu_for(&client()).iter().map(|r| r.path).collect();
    assert_eq!(labels.len(), 6);
    assert!(labels.iter().all(|p| p.starts_with("/cliente/")));

    let admin: Vec<&str> = menu_for(&superadmin()).iter().map(|r| r.path).collect();
    assert!(admin.iter().all(|p| p.starts_with("/admin/")));
}

#[test]
fn landing_depends_on_role() {
    assert_eq!(landing_for(Role::SuperAdmin), Some(ADMIN_DASHBOARD));
    assert_eq!(landing_for(Role::CompanyAdmin), Some(CLIENT_DASHBOARD));
    assert_eq!(landing_for(Role::Employee), None);
}
