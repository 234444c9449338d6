//! User roles and allowed-role sets for protected views.
//!
//! DESIGN
//! ======
//! Routes historically declare allowed roles by name *and* id
//! (`["superadmin", 1]`). Both forms are accepted, and every comparison goes
//! through a single equality rule: each side is canonicalised to a numeric
//! role id when it names a known role; unknown names fall back to a trimmed,
//! case-insensitive string match.

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;

use std::fmt;

/// Closed set of Bodegix roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Platform operator (id 1).
    SuperAdmin,
    /// Company administrator, shown in the UI as "cliente" (id 2).
    CompanyAdmin,
    /// Company employee (id 3).
    Employee,
}

impl Role {
    /// Numeric role id used by the backend.
    #[must_use]
    pub fn id(self) -> i64 {
        match self {
            Self::SuperAdmin => 1,
            Self::CompanyAdmin => 2,
            Self::Employee => 3,
        }
    }

    /// Canonical role name used in tokens and route declarations.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SuperAdmin => "superadmin",
            Self::CompanyAdmin => "cliente",
            Self::Employee => "empleado",
        }
    }

    #[must_use]
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Self::SuperAdmin),
            2 => Some(Self::CompanyAdmin),
            3 => Some(Self::Employee),
            _ => None,
        }
    }

    /// Parse a role name, also accepting a numeric id in string form.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Ok(id) = name.parse::<i64>() {
            return Self::from_id(id);
        }
        match name.to_ascii_lowercase().as_str() {
            "superadmin" => Some(Self::SuperAdmin),
            "cliente" | "client" | "admin_empresa" => Some(Self::CompanyAdmin),
            "empleado" | "employee" => Some(Self::Employee),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of an allowed-roles declaration: a role name or a numeric id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoleRef {
    Name(String),
    Id(i64),
}

impl RoleRef {
    /// Numeric id this entry refers to, if it names a known role.
    #[must_use]
    pub fn canonical_id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Role::from_id(*id).map(Role::id),
            Self::Name(name) => Role::from_name(name).map(Role::id),
        }
    }

    fn matches_name(&self, name: &str) -> bool {
        match self {
            Self::Name(own) => own.trim().eq_ignore_ascii_case(name.trim()),
            Self::Id(_) => false,
        }
    }
}

impl From<&str> for RoleRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<i64> for RoleRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<Role> for RoleRef {
    fn from(role: Role) -> Self {
        Self::Id(role.id())
    }
}

/// Roles permitted to view a protected route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowedRoles(Vec<RoleRef>);

impl AllowedRoles {
    #[must_use]
    pub fn new(entries: Vec<RoleRef>) -> Self {
        Self(entries)
    }

    /// `["superadmin", 1]`
    #[must_use]
    pub fn superadmin() -> Self {
        Self(vec![RoleRef::from("superadmin"), RoleRef::Id(1)])
    }

    /// `["cliente", 2]`
    #[must_use]
    pub fn client() -> Self {
        Self(vec![RoleRef::from("cliente"), RoleRef::Id(2)])
    }

    #[must_use]
    pub fn entries(&self) -> &[RoleRef] {
        &self.0
    }

    /// Membership test: the caller is allowed if its name OR its id matches
    /// any entry.
    #[must_use]
    pub fn permits(&self, role_name: Option<&str>, role_id: Option<i64>) -> bool {
        let by_id = role_id.and_then(Role::from_id).map(Role::id);
        let by_name = role_name.and_then(Role::from_name).map(Role::id);

        self.0.iter().any(|entry| {
            let canonical = entry.canonical_id();
            let id_match = canonical.is_some() && (canonical == by_id || canonical == by_name);
            let raw_name_match = role_name.is_some_and(|name| entry.matches_name(name));
            id_match || raw_name_match
        })
    }
}

impl FromIterator<RoleRef> for AllowedRoles {
    fn from_iter<I: IntoIterator<Item = RoleRef>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
