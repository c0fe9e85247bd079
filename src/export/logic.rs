// src/export/logic.rs

use crate::core::access::AccessScope;
use crate::core::client::ClientLogic;
use crate::core::report::ReportLogic;
use crate::core::session::SessionLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{ExportRecord, SessionExport, SummaryExport};
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportTarget};
use crate::models::period::Period;
use crate::ui::messages::warning;
use std::collections::HashMap;
use std::path::Path;

/// High level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Export sessions or the per-client summary.
    ///
    /// - `file`: absolute path of the output file
    /// - `period`: `Period::All` or any parsed `--range`
    /// - `client`: restrict a session export to one client
    ///
    /// Returns the number of records written.
    #[allow(clippy::too_many_arguments)]
    pub fn export(
        pool: &DbPool,
        scope: &AccessScope,
        target: ExportTarget,
        format: ExportFormat,
        file: &str,
        period: Period,
        client: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let written = match target {
            ExportTarget::Sessions => {
                let records = Self::session_records(pool, scope, period, client)?;
                Self::write(&records, format, "Sessions", path, force)?
            }
            ExportTarget::Summary => {
                if client.is_some() {
                    return Err(AppError::Export(
                        "--client applies to session exports only".into(),
                    ));
                }
                let summary = ReportLogic::summary(&pool.conn, scope, period)?;
                let records: Vec<SummaryExport> =
                    summary.clients.iter().map(SummaryExport::from).collect();
                Self::write(&records, format, "Summary", path, force)?
            }
        };

        if written > 0 {
            ttlog(
                &pool.conn,
                "export",
                &path.to_string_lossy(),
                &format!(
                    "{} {} record(s) as {} ({})",
                    written,
                    target.as_str(),
                    format.as_str(),
                    period.label()
                ),
            )?;
        }

        Ok(written)
    }

    /// Session rows in scope, labelled with their client's name.
    pub fn session_records(
        pool: &DbPool,
        scope: &AccessScope,
        period: Period,
        client: Option<&str>,
    ) -> AppResult<Vec<SessionExport>> {
        let names: HashMap<i64, String> = ClientLogic::list(&pool.conn, scope)?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let sessions = SessionLogic::list(&pool.conn, scope, client, period)?;

        Ok(sessions
            .iter()
            .map(|s| {
                let name = names.get(&s.client_id).map(String::as_str).unwrap_or("");
                SessionExport::from_session(s, name)
            })
            .collect())
    }

    fn write<T: ExportRecord>(
        records: &[T],
        format: ExportFormat,
        sheet: &str,
        path: &Path,
        force: bool,
    ) -> AppResult<usize> {
        if records.is_empty() {
            warning("No records found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(records, path)?,
            ExportFormat::Json => export_json(records, path)?,
            ExportFormat::Xlsx => export_xlsx(records, sheet, path)?,
        }

        Ok(records.len())
    }
}
