// src/export/model.rs

use crate::core::calculator::billing::classify;
use crate::core::calculator::client_summary::ClientSummary;
use crate::models::session::Session;
use serde::Serialize;

/// Flat record shared by the CSV, JSON and XLSX writers.
pub trait ExportRecord: Serialize {
    fn headers() -> Vec<&'static str>;
    fn to_row(&self) -> Vec<String>;
}

/// One session with its reconciliation class.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SessionExport {
    pub id: i64,
    pub client: String,
    pub date: String,
    pub time: String,
    pub status: String,
    pub amount: f64,
    pub chargeable_if_missed: bool,
    pub paid: bool,
    pub classification: String,
    pub invoice_ref: String,
    pub mood_in: u8,
    pub mood_out: u8,
}

impl SessionExport {
    pub fn from_session(s: &Session, client: &str) -> Self {
        Self {
            id: s.id,
            client: client.to_string(),
            date: s.date_str(),
            time: s.time_str(),
            status: s.status.as_str().to_string(),
            amount: s.amount.to_db(),
            chargeable_if_missed: s.chargeable_if_missed,
            paid: s.paid,
            classification: classify(s).as_str().to_string(),
            invoice_ref: s.invoice_ref.clone(),
            mood_in: s.mood_in,
            mood_out: s.mood_out,
        }
    }
}

impl ExportRecord for SessionExport {
    fn headers() -> Vec<&'static str> {
        vec![
            "id",
            "client",
            "date",
            "time",
            "status",
            "amount",
            "chargeable_if_missed",
            "paid",
            "classification",
            "invoice_ref",
            "mood_in",
            "mood_out",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.client.clone(),
            self.date.clone(),
            self.time.clone(),
            self.status.clone(),
            format!("{:.2}", self.amount),
            self.chargeable_if_missed.to_string(),
            self.paid.to_string(),
            self.classification.clone(),
            self.invoice_ref.clone(),
            self.mood_in.to_string(),
            self.mood_out.to_string(),
        ]
    }
}

/// Per-client totals for a period.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SummaryExport {
    pub client_id: i64,
    pub client: String,
    pub sessions_done: usize,
    pub sessions_missed: usize,
    pub total_billable: f64,
    pub total_received: f64,
    pub total_pending: f64,
    pub pending_items: usize,
}

impl From<&ClientSummary> for SummaryExport {
    fn from(c: &ClientSummary) -> Self {
        Self {
            client_id: c.client_id,
            client: c.name.clone(),
            sessions_done: c.totals.sessions_done,
            sessions_missed: c.totals.sessions_missed,
            total_billable: c.totals.total_billable.to_db(),
            total_received: c.totals.total_received.to_db(),
            total_pending: c.totals.total_pending.to_db(),
            pending_items: c.totals.pending_items(),
        }
    }
}

impl ExportRecord for SummaryExport {
    fn headers() -> Vec<&'static str> {
        vec![
            "client_id",
            "client",
            "sessions_done",
            "sessions_missed",
            "total_billable",
            "total_received",
            "total_pending",
            "pending_items",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.client_id.to_string(),
            self.client.clone(),
            self.sessions_done.to_string(),
            self.sessions_missed.to_string(),
            format!("{:.2}", self.total_billable),
            format!("{:.2}", self.total_received),
            format!("{:.2}", self.total_pending),
            self.pending_items.to_string(),
        ]
    }
}
