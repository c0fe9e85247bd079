use super::access::AccessScope;
use crate::db::log::ttlog;
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::{Clinician, User};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use regex::Regex;
use rusqlite::Connection;

pub const MIN_PASSWORD_LENGTH: usize = 8;
const SPECIAL_CHARS: &str = r#"[!@#$%^&*(),.?":{}|<>]"#;

/// Check the password rules and report every violation at once.
pub fn check_password(password: &str) -> AppResult<()> {
    let rules = [
        ("[A-Z]", "at least one uppercase letter"),
        ("[a-z]", "at least one lowercase letter"),
        ("[0-9]", "at least one digit"),
        (SPECIAL_CHARS, "at least one special character"),
    ];

    let mut problems = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        problems.push(format!("at least {} characters", MIN_PASSWORD_LENGTH));
    }

    for (pattern, message) in rules {
        let re = Regex::new(pattern).map_err(|e| AppError::Other(e.to_string()))?;
        if !re.is_match(password) {
            problems.push(message.to_string());
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::WeakPassword(problems))
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Other(format!("failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Other(format!("stored password hash is invalid: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Other(format!("password verification failed: {}", e))),
    }
}

fn load_user(conn: &Connection, username: &str) -> AppResult<User> {
    users::find_user(conn, username)?.ok_or_else(|| AppError::UserNotFound(username.into()))
}

fn normalized_username(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation("username cannot be empty".into()));
    }
    Ok(name.to_string())
}

pub struct UserLogic;

impl UserLogic {
    /// Create an account.
    ///
    /// A clinician gets a `psicologos` row named after the account and is
    /// their own responsible clinician. An assistant must name an existing
    /// responsible clinician. The very first account is made admin.
    pub fn add(
        conn: &Connection,
        scope: &AccessScope,
        username: &str,
        password: &str,
        role: Role,
        responsible: Option<i64>,
    ) -> AppResult<User> {
        let username = normalized_username(username)?;
        check_password(password)?;

        let bootstrap = users::count_users(conn)? == 0;
        if !bootstrap {
            scope.require_admin()?;
        }

        if users::find_user(conn, &username)?.is_some() {
            return Err(AppError::DuplicateUser(username));
        }

        let hash = hash_password(password)?;
        let tx = conn.unchecked_transaction()?;

        let clinician_id = match role {
            Role::Clinician => {
                if responsible.is_some() {
                    return Err(AppError::Validation(
                        "a clinician is their own responsible clinician, drop --responsible"
                            .into(),
                    ));
                }
                if users::find_clinician_by_name(&tx, &username)?.is_some() {
                    return Err(AppError::DuplicateUser(username));
                }
                Some(users::insert_clinician(&tx, &username)?)
            }
            Role::Assistant => {
                let cid = responsible.ok_or_else(|| {
                    AppError::Validation(
                        "an assistant needs a responsible clinician (--responsible)".into(),
                    )
                })?;
                if users::find_clinician(&tx, cid)?.is_none() {
                    return Err(AppError::ClinicianNotFound(cid.to_string()));
                }
                Some(cid)
            }
        };

        let id = users::insert_user(&tx, &username, &hash, role, clinician_id, bootstrap)?;
        ttlog(
            &tx,
            "add",
            &format!("user:{}", username),
            &format!("Created {} account by {}", role.label(), scope.actor_name()),
        )?;
        tx.commit()?;

        Ok(User {
            id,
            username,
            password_hash: hash,
            role,
            clinician_id,
            is_admin: bootstrap,
        })
    }

    /// Turn an assistant into a clinician with admin privilege.
    pub fn promote(conn: &Connection, scope: &AccessScope, username: &str) -> AppResult<User> {
        scope.require_admin()?;
        let mut user = load_user(conn, username)?;

        if user.role == Role::Clinician {
            return Err(AppError::Validation(format!(
                "'{}' is already a clinician",
                user.username
            )));
        }

        let tx = conn.unchecked_transaction()?;
        let cid = match users::find_clinician_by_name(&tx, &user.username)? {
            Some(c) => c.id,
            None => users::insert_clinician(&tx, &user.username)?,
        };

        user.role = Role::Clinician;
        user.clinician_id = Some(cid);
        user.is_admin = true;
        users::update_user_access(&tx, &user)?;
        ttlog(
            &tx,
            "edit",
            &format!("user:{}", user.username),
            &format!("Promoted to clinician by {}", scope.actor_name()),
        )?;
        tx.commit()?;

        Ok(user)
    }

    /// Grant or revoke the admin privilege.
    pub fn set_admin(
        conn: &Connection,
        scope: &AccessScope,
        username: &str,
        admin: bool,
    ) -> AppResult<User> {
        let acting = scope.require_admin()?;
        let mut user = load_user(conn, username)?;

        if !admin && acting.id == user.id {
            return Err(AppError::Validation(
                "an administrator cannot revoke their own privilege".into(),
            ));
        }

        user.is_admin = admin;
        users::update_user_access(conn, &user)?;
        ttlog(
            conn,
            "edit",
            &format!("user:{}", user.username),
            if admin {
                "Admin privilege granted"
            } else {
                "Admin privilege revoked"
            },
        )?;

        Ok(user)
    }

    /// Rename an account; a clinician's display name follows.
    pub fn rename(
        conn: &Connection,
        scope: &AccessScope,
        username: &str,
        new_username: &str,
    ) -> AppResult<User> {
        let mut user = load_user(conn, username)?;
        Self::check_self_or_admin(scope, &user)?;

        let new_username = normalized_username(new_username)?;
        if new_username == user.username {
            return Ok(user);
        }
        if users::find_user(conn, &new_username)?.is_some() {
            return Err(AppError::DuplicateUser(new_username));
        }

        let tx = conn.unchecked_transaction()?;
        users::rename_user(&tx, user.id, &new_username)?;
        if user.role == Role::Clinician
            && let Some(cid) = user.clinician_id
        {
            users::rename_clinician(&tx, cid, &new_username)?;
        }
        ttlog(
            &tx,
            "edit",
            &format!("user:{}", new_username),
            &format!("Renamed from '{}'", user.username),
        )?;
        tx.commit()?;

        user.username = new_username;
        Ok(user)
    }

    pub fn change_password(
        conn: &Connection,
        username: &str,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> AppResult<()> {
        let user = load_user(conn, username)?;

        if !verify_password(current, &user.password_hash)? {
            return Err(AppError::WrongPassword);
        }
        if new != confirm {
            return Err(AppError::PasswordMismatch);
        }
        check_password(new)?;

        users::update_password(conn, user.id, &hash_password(new)?)?;
        ttlog(
            conn,
            "edit",
            &format!("user:{}", user.username),
            "Password changed",
        )?;
        Ok(())
    }

    pub fn list(conn: &Connection) -> AppResult<Vec<User>> {
        users::list_users(conn)
    }

    pub fn clinicians(conn: &Connection) -> AppResult<Vec<Clinician>> {
        users::list_clinicians(conn)
    }

    fn check_self_or_admin(scope: &AccessScope, target: &User) -> AppResult<()> {
        match &scope.actor {
            Some(u) if u.is_admin || u.id == target.id => Ok(()),
            Some(u) => Err(AppError::PermissionDenied(format!(
                "user '{}' cannot modify '{}'",
                u.username, target.username
            ))),
            None => Ok(()),
        }
    }
}
