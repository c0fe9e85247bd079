//! Per-clinician scoping of every query.

use crate::db::users::{find_clinician, find_user};
use crate::errors::{AppError, AppResult};
use crate::models::client::Client;
use crate::models::user::User;
use rusqlite::Connection;

/// On whose behalf a command runs, and which clinician's data it may see.
#[derive(Debug, Clone, Default)]
pub struct AccessScope {
    /// Acting user (`--user`), if any.
    pub actor: Option<User>,
    /// Clinician the command is restricted to; `None` means the whole practice.
    pub clinician_id: Option<i64>,
}

impl AccessScope {
    /// Whole practice, no acting user.
    pub fn practice() -> Self {
        Self::default()
    }

    /// Build the scope from the global `--user` option and an optional
    /// explicit `--clinician`.
    ///
    /// An acting user is bound to their responsible clinician; only an
    /// admin may look at another clinician's data.
    pub fn resolve(
        conn: &Connection,
        username: Option<&str>,
        clinician: Option<i64>,
    ) -> AppResult<Self> {
        if let Some(cid) = clinician
            && find_clinician(conn, cid)?.is_none()
        {
            return Err(AppError::ClinicianNotFound(cid.to_string()));
        }

        let Some(name) = username else {
            return Ok(Self {
                actor: None,
                clinician_id: clinician,
            });
        };

        let user = find_user(conn, name)?.ok_or_else(|| AppError::UserNotFound(name.into()))?;

        let clinician_id = match (clinician, user.clinician_id) {
            (Some(req), Some(own)) if req != own && !user.is_admin => {
                return Err(AppError::PermissionDenied(format!(
                    "user '{}' may only access their own clinician's records",
                    user.username
                )));
            }
            (Some(req), _) => Some(req),
            (None, Some(own)) => Some(own),
            (None, None) if user.is_admin => None,
            (None, None) => {
                return Err(AppError::PermissionDenied(format!(
                    "user '{}' has no responsible clinician",
                    user.username
                )));
            }
        };

        Ok(Self {
            actor: Some(user),
            clinician_id,
        })
    }

    /// The acting user, who must hold the admin privilege.
    pub fn require_admin(&self) -> AppResult<&User> {
        match &self.actor {
            Some(u) if u.is_admin => Ok(u),
            Some(u) => Err(AppError::PermissionDenied(format!(
                "user '{}' is not an administrator",
                u.username
            ))),
            None => Err(AppError::PermissionDenied(
                "this operation requires an administrator (--user)".into(),
            )),
        }
    }

    /// Reject clients that belong to another clinician.
    pub fn check_client(&self, client: &Client) -> AppResult<()> {
        match self.clinician_id {
            Some(cid) if client.clinician_id != Some(cid) => Err(AppError::PermissionDenied(
                format!("client '{}' belongs to another clinician", client.name),
            )),
            _ => Ok(()),
        }
    }

    /// Name recorded in the audit log.
    pub fn actor_name(&self) -> &str {
        self.actor.as_ref().map(|u| u.username.as_str()).unwrap_or("cli")
    }
}
