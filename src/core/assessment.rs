use super::access::AccessScope;
use super::client::ClientLogic;
use crate::db::log::ttlog;
use crate::db::queries::{insert_assessment, list_assessments};
use crate::errors::{AppError, AppResult};
use crate::models::assessment::Assessment;
use chrono::NaiveDate;
use rusqlite::Connection;

pub struct AssessmentLogic;

impl AssessmentLogic {
    pub fn add(
        conn: &Connection,
        scope: &AccessScope,
        client_key: &str,
        date: NaiveDate,
        tags: &str,
        description: &str,
    ) -> AppResult<Assessment> {
        let client = ClientLogic::resolve(conn, scope, client_key)?;

        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::Validation(
                "assessment description cannot be empty".into(),
            ));
        }

        // Empty tags are dropped; the rest are stored as "a, b".
        let tags = tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        let id = insert_assessment(conn, client.id, date, &tags, description)?;
        ttlog(
            conn,
            "add",
            &format!("assessment:{}", id),
            &format!("Assessment for '{}'", client.name),
        )?;

        Ok(Assessment {
            id,
            client_id: client.id,
            date,
            tags,
            description: description.to_string(),
        })
    }

    /// Newest first.
    pub fn list(
        conn: &Connection,
        scope: &AccessScope,
        client_key: &str,
    ) -> AppResult<Vec<Assessment>> {
        let client = ClientLogic::resolve(conn, scope, client_key)?;
        list_assessments(conn, client.id)
    }
}
