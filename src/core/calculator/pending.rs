use super::totals::Totals;
use crate::errors::{AppError, AppResult};
use crate::models::client::Client;
use crate::models::money::Money;
use crate::models::session::Session;
use crate::utils::text::sort_key;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingRow {
    pub client_id: i64,
    pub name: String,
    pub pending: Money,
    pub realized_pending: usize,
    pub missed_chargeable_pending: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub rows: Vec<PendingRow>,
    pub total_pending: Money,
    pub total_items: usize,
}

/// Clients with an outstanding balance for sessions dated in `[start, end]`.
///
/// Rows are sorted by pending amount (largest first), then by name.
pub fn build_pending_report(
    clients: &[Client],
    sessions: &[Session],
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<PendingReport> {
    if end < start {
        return Err(AppError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let mut by_client: HashMap<i64, Totals> = HashMap::new();
    for s in sessions.iter().filter(|s| start <= s.date && s.date <= end) {
        by_client.entry(s.client_id).or_default().add(s);
    }

    let mut rows: Vec<PendingRow> = clients
        .iter()
        .filter_map(|c| {
            let t = by_client.get(&c.id)?;
            t.total_pending.is_positive().then(|| PendingRow {
                client_id: c.id,
                name: c.name.clone(),
                pending: t.total_pending,
                realized_pending: t.realized_pending,
                missed_chargeable_pending: t.missed_chargeable_pending,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.pending
            .cmp(&a.pending)
            .then_with(|| sort_key(&a.name).cmp(&sort_key(&b.name)))
    });

    let total_pending = rows.iter().map(|r| r.pending).sum();
    let total_items = rows
        .iter()
        .map(|r| r.realized_pending + r.missed_chargeable_pending)
        .sum();

    Ok(PendingReport {
        start,
        end,
        rows,
        total_pending,
        total_items,
    })
}
