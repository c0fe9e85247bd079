use super::role::Role;
use serde::Serialize;

/// Practitioner who owns a set of clients (`psicologos` row).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clinician {
    pub id: i64,
    pub name: String,
}

/// Application account (`login` row).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub clinician_id: Option<i64>, // ⇔ login.psicologo_responsavel
    pub is_admin: bool,            // ⇔ login.privilegio
}
