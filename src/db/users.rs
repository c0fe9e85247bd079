//! `login` and `psicologos` tables.

use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::{Clinician, User};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_user_row(row: &Row) -> Result<User> {
    let role_str: String = row.get("funcao")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    Ok(User {
        id: row.get("id")?,
        username: row.get("usuario")?,
        password_hash: row.get("senha")?,
        role,
        clinician_id: row.get("psicologo_responsavel")?,
        is_admin: row.get::<_, i64>("privilegio")? != 0,
    })
}

fn map_clinician_row(row: &Row) -> Result<Clinician> {
    Ok(Clinician {
        id: row.get("id")?,
        name: row.get("nome")?,
    })
}

// --- clinicians -----------------------------------------------------------

pub fn insert_clinician(conn: &Connection, name: &str) -> AppResult<i64> {
    conn.execute("INSERT INTO psicologos (nome) VALUES (?1)", [name])?;
    Ok(conn.last_insert_rowid())
}

pub fn find_clinician(conn: &Connection, id: i64) -> AppResult<Option<Clinician>> {
    let mut stmt = conn.prepare_cached("SELECT id, nome FROM psicologos WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_clinician_row).optional()?)
}

pub fn find_clinician_by_name(conn: &Connection, name: &str) -> AppResult<Option<Clinician>> {
    let mut stmt = conn.prepare_cached("SELECT id, nome FROM psicologos WHERE nome = ?1")?;
    Ok(stmt.query_row([name], map_clinician_row).optional()?)
}

pub fn list_clinicians(conn: &Connection) -> AppResult<Vec<Clinician>> {
    let mut stmt = conn.prepare_cached("SELECT id, nome FROM psicologos ORDER BY nome ASC")?;
    let rows = stmt.query_map([], map_clinician_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn rename_clinician(conn: &Connection, id: i64, new_name: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE psicologos SET nome = ?1 WHERE id = ?2",
        params![new_name, id],
    )?;
    Ok(())
}

// --- users ----------------------------------------------------------------

pub fn count_users(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM login", [], |row| row.get(0))?)
}

pub fn insert_user(
    conn: &Connection,
    username: &str,
    password_hash: &str,
    role: Role,
    clinician_id: Option<i64>,
    is_admin: bool,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO login (usuario, senha, funcao, psicologo_responsavel, privilegio)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            username,
            password_hash,
            role.to_db_str(),
            clinician_id,
            is_admin as i64
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_user(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM login WHERE usuario = ?1")?;
    Ok(stmt.query_row([username], map_user_row).optional()?)
}

pub fn list_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM login ORDER BY usuario ASC")?;
    let rows = stmt.query_map([], map_user_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Persist role, responsible clinician and admin flag of `user`.
pub fn update_user_access(conn: &Connection, user: &User) -> AppResult<()> {
    conn.execute(
        "UPDATE login SET funcao = ?1, psicologo_responsavel = ?2, privilegio = ?3
         WHERE id = ?4",
        params![
            user.role.to_db_str(),
            user.clinician_id,
            user.is_admin as i64,
            user.id
        ],
    )?;
    Ok(())
}

pub fn rename_user(conn: &Connection, id: i64, new_username: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE login SET usuario = ?1 WHERE id = ?2",
        params![new_username, id],
    )?;
    Ok(())
}

pub fn update_password(conn: &Connection, id: i64, password_hash: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE login SET senha = ?1 WHERE id = ?2",
        params![password_hash, id],
    )?;
    Ok(())
}
