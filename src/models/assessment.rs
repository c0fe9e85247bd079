use chrono::NaiveDate;
use serde::Serialize;

/// Free-text clinical assessment attached to a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub id: i64,
    pub client_id: i64,
    pub date: NaiveDate,
    pub tags: String,
    pub description: String,
}
