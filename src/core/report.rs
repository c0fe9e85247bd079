//! Dashboard and pending reports assembled from the reconciliation engine.

use super::access::AccessScope;
use super::calculator::client_summary::build_client_summaries;
use super::calculator::pending::{PendingReport, build_pending_report};
use super::calculator::totals::Totals;
use super::client::ClientLogic;
use crate::db::queries::{SessionQuery, load_sessions};
use crate::errors::AppResult;
use crate::models::financial_summary::FinancialSummary;
use crate::models::period::Period;
use crate::utils::date::{first_of_month, today};
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;

/// One line of the annual view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthTotals {
    pub month: u32,
    pub totals: Totals,
}

pub struct ReportLogic;

impl ReportLogic {
    /// Totals plus one row per client in scope for `period`.
    ///
    /// Clients without sessions in the period still get a (zero) row.
    pub fn summary(
        conn: &Connection,
        scope: &AccessScope,
        period: Period,
    ) -> AppResult<FinancialSummary> {
        let clients = ClientLogic::list(conn, scope)?;
        let sessions = load_sessions(
            conn,
            &SessionQuery {
                clinician_id: scope.clinician_id,
                client_id: None,
                period,
            },
        )?;

        Ok(FinancialSummary {
            period,
            clinician_id: scope.clinician_id,
            totals: Totals::from_sessions(&sessions),
            clients: build_client_summaries(&clients, &sessions),
        })
    }

    /// Totals of each month of `year`, January first.
    pub fn months_of_year(
        conn: &Connection,
        scope: &AccessScope,
        year: i32,
    ) -> AppResult<Vec<MonthTotals>> {
        let sessions = load_sessions(
            conn,
            &SessionQuery {
                clinician_id: scope.clinician_id,
                client_id: None,
                period: Period::Year(year),
            },
        )?;

        let mut months: Vec<MonthTotals> = (1..=12)
            .map(|month| MonthTotals {
                month,
                totals: Totals::default(),
            })
            .collect();

        for s in &sessions {
            months[s.date.month0() as usize].totals.add(s);
        }

        Ok(months)
    }

    /// Clients with an outstanding balance between `start` and `end`.
    /// Defaults: first day of the current month up to today.
    pub fn pending(
        conn: &Connection,
        scope: &AccessScope,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<PendingReport> {
        let now = today();
        let end = end.unwrap_or(now);
        let start = start.unwrap_or_else(|| first_of_month(now));

        let period = Period::range(start, end)?;
        let clients = ClientLogic::list(conn, scope)?;
        let sessions = load_sessions(
            conn,
            &SessionQuery {
                clinician_id: scope.clinician_id,
                client_id: None,
                period,
            },
        )?;

        build_pending_report(&clients, &sessions, start, end)
    }
}
