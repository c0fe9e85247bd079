use super::totals::Totals;
use crate::models::client::Client;
use crate::models::session::Session;
use crate::utils::text::sort_key;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientSummary {
    pub client_id: i64,
    pub name: String,
    pub totals: Totals,
}

/// Group totals by client.
///
/// Every client passed in gets a row, including clients without sessions
/// in the set. Sessions whose client is not in `clients` are ignored.
/// Rows are ordered by name, ignoring case and accents.
pub fn build_client_summaries(clients: &[Client], sessions: &[Session]) -> Vec<ClientSummary> {
    let mut by_client: HashMap<i64, Totals> =
        clients.iter().map(|c| (c.id, Totals::default())).collect();

    for s in sessions {
        if let Some(t) = by_client.get_mut(&s.client_id) {
            t.add(s);
        }
    }

    let mut rows: Vec<ClientSummary> = clients
        .iter()
        .map(|c| ClientSummary {
            client_id: c.id,
            name: c.name.clone(),
            totals: by_client.get(&c.id).copied().unwrap_or_default(),
        })
        .collect();

    rows.sort_by_cached_key(|r| (sort_key(&r.name), r.client_id));
    rows
}
