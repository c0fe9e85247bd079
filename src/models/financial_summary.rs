use crate::core::calculator::client_summary::ClientSummary;
use crate::core::calculator::totals::Totals;
use crate::models::period::Period;

/// Dashboard view: practice-wide totals plus one row per client.
#[derive(Debug, Clone)]
pub struct FinancialSummary {
    pub period: Period,
    pub clinician_id: Option<i64>,
    pub totals: Totals,
    pub clients: Vec<ClientSummary>,
}
