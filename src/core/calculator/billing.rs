//! Per-session classification rules.
//!
//! - billable: realized, or missed with the chargeable flag set
//! - received: marked paid (counted even when not billable)
//! - pending:  billable and not paid

use crate::models::session::Session;
use crate::models::session_status::SessionStatus;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Classification {
    Paid,
    Pending,
    NotBillable,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Paid => "paid",
            Classification::Pending => "pending",
            Classification::NotBillable => "not billable",
        }
    }
}

pub fn is_billable(session: &Session) -> bool {
    match session.status {
        SessionStatus::Realized => true,
        SessionStatus::Missed => session.chargeable_if_missed,
    }
}

pub fn is_received(session: &Session) -> bool {
    session.paid
}

pub fn is_pending(session: &Session) -> bool {
    is_billable(session) && !session.paid
}

pub fn classify(session: &Session) -> Classification {
    if is_received(session) {
        Classification::Paid
    } else if is_pending(session) {
        Classification::Pending
    } else {
        Classification::NotBillable
    }
}
