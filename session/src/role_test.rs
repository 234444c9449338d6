use super::*;

#[test]
fn role_ids_and_names_are_stable() {
    assert_eq!(Role::SuperAdmin.id(), 1);
    assert_eq!(Role::CompanyAdmin.id(), 2);
    assert_eq!(Role::Employee.id(), 3);
    assert_eq!(Role::CompanyAdmin.to_string(), "cliente");
}

#[test]
fn from_name_is_case_insensitive_and_accepts_numeric_strings() {
    assert_eq!(Role::from_name(" SuperAdmin "), Some(Role::SuperAdmin));
    assert_eq!(Role::from_name("cliente"), Some(Role::CompanyAdmin));
    assert_eq!(Role::from_name("2"), Some(Role::CompanyAdmin));
    assert_eq!(Role::from_name("empleado"), Some(Role::Employee));
    assert_eq!(Role::from_name("visitante"), None);
    assert_eq!(Role::from_id(4), None);
}

#[test]
fn client_identity_is_permitted_on_client_routes() {
    let allowed = AllowedRoles::new(vec![RoleRef::from("cliente"), RoleRef::from(2)]);
    assert!(allowed.permits(Some("cliente"), Some(2)));
}

#[test]
fn client_identity_is_rejected_on_superadmin_routes() {
    let allowed = AllowedRoles::new(vec![RoleRef::from("superadmin"), RoleRef::from(1)]);
    assert!(!allowed.permits(Some("cliente"), Some(2)));
}

#[test]
fn either_name_or_id_alone_authorizes() {
    let allowed = AllowedRoles::superadmin();
    assert!(allowed.permits(Some("superadmin"), None));
    assert!(allowed.permits(None, Some(1)));
    assert!(!allowed.permits(None, None));
}

#[test]
fn name_only_declaration_matches_numeric_identity() {
    let allowed: AllowedRoles = [RoleRef::from("cliente")].into_iter().collect();
    assert!(allowed.permits(None, Some(2)));
}

#[test]
fn id_only_declaration_matches_named_identity() {
    let allowed: AllowedRoles = [RoleRef::from(1)].into_iter().collect();
    assert!(allowed.permits(Some("SUPERADMIN"), None));
}

#[test]
fn unknown_names_match_only_literally() {
    let allowed: AllowedRoles = [RoleRef::from("auditor")].into_iter().collect();
    assert!(allowed.permits(Some("Auditor"), None));
    assert!(!allowed.permits(Some("cliente"), Some(2)));
}

#[test]
fn unknown_ids_never_match() {
    let allowed: AllowedRoles = [RoleRef::from(99)].into_iter().collect();
    assert!(!allowed.permits(None, Some(99)));
}

#[test]
fn empty_declaration_permits_nobody() {
    assert!(!AllowedRoles::default().permits(Some("superadmin"), Some(1)));
}
