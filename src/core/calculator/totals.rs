use super::billing::{is_billable, is_pending, is_received};
use crate::models::money::Money;
use crate::models::session::Session;
use serde::Serialize;

/// Sums and counts over a set of sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total_received: Money,
    pub total_pending: Money,
    pub total_billable: Money,
    pub sessions_done: usize,
    pub sessions_missed: usize,
    /// Realized sessions not yet paid.
    pub realized_pending: usize,
    /// Missed sessions that bill the client and are not yet paid.
    pub missed_chargeable_pending: usize,
}

impl Totals {
    pub fn from_sessions<'a, I>(sessions: I) -> Self
    where
        I: IntoIterator<Item = &'a Session>,
    {
        let mut totals = Totals::default();
        for s in sessions {
            totals.add(s);
        }
        totals
    }

    pub fn add(&mut self, session: &Session) {
        if session.status.is_realized() {
            self.sessions_done += 1;
        } else {
            self.sessions_missed += 1;
        }

        if is_received(session) {
            self.total_received += session.amount;
        }

        if is_billable(session) {
            self.total_billable += session.amount;
        }

        if is_pending(session) {
            self.total_pending += session.amount;
            if session.status.is_realized() {
                self.realized_pending += 1;
            } else {
                self.missed_chargeable_pending += 1;
            }
        }
    }

    /// Number of sessions still waiting for payment.
    pub fn pending_items(&self) -> usize {
        self.realized_pending + self.missed_chargeable_pending
    }
}
