use super::*;

#[test]
fn employee_form_binds_role_and_company() {
    let form = employee_form(" Eva ", "eva@example.com", "secreta", 7).expect("valid");
    assert_eq!(form.nombre, "Eva");
    assert_eq!(form.rol_id, Some(EMPLOYEE_ROLE_ID));
    assert_eq!(form.empresa_id, Some(7));
    assert_eq!(form.contrasena.as_deref(), Some("secreta"));
}

#[test]
fn employee_form_rejects_incomplete_input() {
    assert_eq!(employee_form("", "eva@example.com", "secreta", 7), Err("Todos los campos son obligatorios."));
    assert_eq!(employee_form("Eva", "eva.example.com", "secreta", 7), Err("Correo electrónico inválido."));
    assert_eq!(
        employee_form("Eva", "eva@example.com", "corta", 7),
        Err("La contraseña debe tener al menos 6 caracteres.")
    );
}

#[test]
fn employee_update_form_keeps_password_optional() {
    let form = employee_update_form(" Eva ", "eva@example.com", "", 7).expect("valid");
    assert_eq!(form.nombre, "Eva");
    assert_eq!(form.contrasena, None);
    assert_eq!(form.rol_id, Some(EMPLOYEE_ROLE_ID));
    assert_eq!(form.empresa_id, Some(7));

    let with_password = employee_update_form("Eva", "eva@example.com", "nuevaclave", 7).expect("valid");
    assert_eq!(with_password.contrasena.as_deref(), Some("nuevaclave"));
}

#[test]
fn employee_update_form_still_validates_fields() {
    assert_eq!(employee_update_form("", "eva@example.com", "", 7), Err("Todos los campos son obligatorios."));
    assert_eq!(employee_update_form("Eva", "eva.example.com", "", 7), Err("Correo electrónico inválido."));
    assert_eq!(
        employee_update_form("Eva", "eva@example.com", "corta", 7),
        Err("La contraseña debe tener al menos 6 caracteres.")
    );
}
