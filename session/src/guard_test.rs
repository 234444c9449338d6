use super::*;
use crate::role::RoleRef;

fn identity(role_name: Option<&str>, role_id: Option<i64>) -> Identity {
    Identity {
        subject_id: "42".to_owned(),
        role_name: role_name.map(str::to_owned),
        role_id,
        company_id: Some(7),
        company_name: None,
        display_name: None,
    }
}

#[test]
fn missing_identity_redirects_to_login() {
    assert_eq!(check(None, &AllowedRoles::client()), GuardDecision::Redirect(routes::LOGIN));
}

#[test]
fn matching_role_renders() {
    let allowed = AllowedRoles::new(vec![RoleRef::from("cliente"), RoleRef::from(2)]);
    let who = identity(Some("cliente"), Some(2));
    assert_eq!(check(Some(&who), &allowed), GuardDecision::Render);
}

#[test]
fn foreign_role_redirects_to_login() {
    let allowed = AllowedRoles::new(vec![RoleRef::from("superadmin"), RoleRef::from(1)]);
    let who = identity(Some("cliente"), Some(2));
    assert_eq!(check(Some(&who), &allowed), GuardDecision::Redirect(routes::LOGIN));
}

#[test]
fn identity_without_role_is_redirected() {
    let who = identity(None, None);
    assert!(!check(Some(&who), &AllowedRoles::superadmin()).is_render());
}

#[test]
fn id_only_identity_renders() {
    let who = identity(None, Some(1));
    assert!(check(Some(&who), &AllowedRoles::superadmin()).is_render());
}
