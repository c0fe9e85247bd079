use super::{money::Money, session_status::SessionStatus};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

pub const DEFAULT_INVOICE_REF: &str = "NF-";
pub const DEFAULT_MOOD: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub id: i64,
    pub client_id: i64,              // ⇔ sessoes.cliente_id
    pub date: NaiveDate,             // ⇔ sessoes.data (TEXT "YYYY-MM-DD")
    pub time: Option<NaiveTime>,     // ⇔ sessoes.hora (TEXT "HH:MM", '' nelle righe vecchie)
    pub amount: Money,               // ⇔ sessoes.valor (REAL)
    pub status: SessionStatus,       // ⇔ sessoes.status ('realizada' | 'falta')
    pub chargeable_if_missed: bool,  // ⇔ sessoes.cobrar
    pub paid: bool,                  // ⇔ sessoes.pagamento
    pub invoice_ref: String,         // ⇔ sessoes.nota_fiscal ("NF-…")

    // session diary
    pub content: String,
    pub goal: String,
    pub material: String,
    pub homework: String,
    pub mood_in: u8,
    pub mood_out: u8,
    pub next_session: String,
    pub observation: String,
}

impl Session {
    /// Build a new, not yet persisted session (`id = 0`) with empty diary
    /// fields, neutral moods and the placeholder invoice reference.
    pub fn new(
        client_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        amount: Money,
        status: SessionStatus,
    ) -> Self {
        Self {
            id: 0,
            client_id,
            date,
            time: Some(time),
            amount,
            status,
            chargeable_if_missed: false,
            paid: false,
            invoice_ref: DEFAULT_INVOICE_REF.to_string(),
            content: String::new(),
            goal: String::new(),
            material: String::new(),
            homework: String::new(),
            mood_in: DEFAULT_MOOD,
            mood_out: DEFAULT_MOOD,
            next_session: String::new(),
            observation: String::new(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// `HH:MM`, or empty for legacy rows stored without a time.
    pub fn time_str(&self) -> String {
        self.time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default()
    }
}
