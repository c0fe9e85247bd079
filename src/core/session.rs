use super::access::AccessScope;
use super::client::ClientLogic;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::queries::{self, SessionQuery};
use crate::errors::{AppError, AppResult};
use crate::models::client::Client;
use crate::models::money::Money;
use crate::models::period::Period;
use crate::models::session::{DEFAULT_INVOICE_REF, Session};
use crate::models::session_status::SessionStatus;
use crate::utils::time::is_on_grid;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;

/// Bookable times: every `step_minutes` from `start_hour` up to (not
/// including) `end_hour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    pub start_hour: u32,
    pub end_hour: u32,
    pub step_minutes: u32,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 22,
            step_minutes: 30,
        }
    }
}

impl SlotGrid {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            start_hour: cfg.slot_start_hour,
            end_hour: cfg.slot_end_hour,
            step_minutes: cfg.slot_minutes,
        }
    }

    pub fn contains(&self, t: NaiveTime) -> bool {
        is_on_grid(t, self.start_hour, self.end_hour, self.step_minutes)
    }
}

/// Fields set on add or changed on update. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct SessionChanges {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub amount: Option<Money>,
    pub status: Option<SessionStatus>,
    pub chargeable_if_missed: Option<bool>,
    pub paid: Option<bool>,
    pub invoice_ref: Option<String>,
    pub content: Option<String>,
    pub goal: Option<String>,
    pub material: Option<String>,
    pub homework: Option<String>,
    pub mood_in: Option<i64>,
    pub mood_out: Option<i64>,
    pub next_session: Option<String>,
    pub observation: Option<String>,
}

impl SessionChanges {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.time.is_none()
            && self.amount.is_none()
            && self.status.is_none()
            && self.chargeable_if_missed.is_none()
            && self.paid.is_none()
            && self.invoice_ref.is_none()
            && self.content.is_none()
            && self.goal.is_none()
            && self.material.is_none()
            && self.homework.is_none()
            && self.mood_in.is_none()
            && self.mood_out.is_none()
            && self.next_session.is_none()
            && self.observation.is_none()
    }

    /// Apply onto `s`. Moods are range-checked here because the session
    /// stores them as `u8`.
    fn apply_to(self, s: &mut Session) -> AppResult<()> {
        if let Some(d) = self.date {
            s.date = d;
        }
        if let Some(t) = self.time {
            s.time = Some(t);
        }
        if let Some(a) = self.amount {
            s.amount = a;
        }
        if let Some(st) = self.status {
            s.status = st;
        }
        if let Some(c) = self.chargeable_if_missed {
            s.chargeable_if_missed = c;
        }
        if let Some(p) = self.paid {
            s.paid = p;
        }
        if let Some(nf) = self.invoice_ref {
            s.invoice_ref = nf.trim().to_string();
        }
        if let Some(v) = self.content {
            s.content = v;
        }
        if let Some(v) = self.goal {
            s.goal = v;
        }
        if let Some(v) = self.material {
            s.material = v;
        }
        if let Some(v) = self.homework {
            s.homework = v;
        }
        if let Some(m) = self.mood_in {
            s.mood_in = checked_mood(m)?;
        }
        if let Some(m) = self.mood_out {
            s.mood_out = checked_mood(m)?;
        }
        if let Some(v) = self.next_session {
            s.next_session = v;
        }
        if let Some(v) = self.observation {
            s.observation = v;
        }
        Ok(())
    }
}

fn checked_mood(v: i64) -> AppResult<u8> {
    if (1..=5).contains(&v) {
        Ok(v as u8)
    } else {
        Err(AppError::InvalidMood(v))
    }
}

/// Field checks that do not need the database. The slot grid is checked
/// separately, see [`check_slot`].
pub fn validate_session(s: &Session) -> AppResult<()> {
    if s.amount.cents() < 0 {
        return Err(AppError::InvalidAmount(s.amount.to_string()));
    }

    if !s.invoice_ref.starts_with(DEFAULT_INVOICE_REF) {
        return Err(AppError::InvalidInvoiceRef(s.invoice_ref.clone()));
    }

    for mood in [s.mood_in, s.mood_out] {
        checked_mood(mood as i64)?;
    }

    Ok(())
}

pub fn check_slot(time: NaiveTime, grid: &SlotGrid) -> AppResult<()> {
    if grid.contains(time) {
        return Ok(());
    }
    Err(AppError::InvalidTime(format!(
        "{} is not a bookable slot ({:02}:00 to {:02}:00 every {} minutes)",
        time.format("%H:%M"),
        grid.start_hour,
        grid.end_hour,
        grid.step_minutes
    )))
}

fn ensure_slot_free(conn: &Connection, client: &Client, s: &Session) -> AppResult<()> {
    // senza orario non occupa nessuno slot
    let Some(time) = s.time else {
        return Ok(());
    };
    let exclude = (s.id != 0).then_some(s.id);
    if queries::slot_taken(conn, client.clinician_id, client.id, s.date, time, exclude)? {
        return Err(AppError::DuplicateSlot {
            date: s.date_str(),
            time: s.time_str(),
        });
    }
    Ok(())
}

pub struct SessionLogic;

impl SessionLogic {
    /// Schedule or record a session. The amount defaults to the client's
    /// session price.
    pub fn add(
        conn: &Connection,
        scope: &AccessScope,
        grid: &SlotGrid,
        client_key: &str,
        date: NaiveDate,
        time: NaiveTime,
        changes: SessionChanges,
    ) -> AppResult<Session> {
        let client = ClientLogic::resolve(conn, scope, client_key)?;
        let time = changes.time.unwrap_or(time);

        let mut session = Session::new(
            client.id,
            date,
            time,
            client.session_price,
            SessionStatus::Realized,
        );
        changes.apply_to(&mut session)?;

        validate_session(&session)?;
        check_slot(time, grid)?;
        ensure_slot_free(conn, &client, &session)?;

        session.id = queries::insert_session(conn, &session)?;

        ttlog(
            conn,
            "add",
            &format!("session:{}", session.id),
            &format!(
                "{} {} {} for '{}'",
                session.date_str(),
                session.time_str(),
                session.status.as_str(),
                client.name
            ),
        )?;

        Ok(session)
    }

    /// Change only the provided fields. A new time must be on the grid and
    /// any move re-checks that the slot is free.
    pub fn update(
        conn: &Connection,
        scope: &AccessScope,
        grid: &SlotGrid,
        id: i64,
        changes: SessionChanges,
    ) -> AppResult<Session> {
        let (mut session, client) = Self::load_in_scope(conn, scope, id)?;
        let new_time = changes.time.filter(|t| session.time != Some(*t));
        let moved = new_time.is_some() || changes.date.is_some_and(|d| d != session.date);

        changes.apply_to(&mut session)?;
        validate_session(&session)?;

        // sessions left off the grid by an older slot config stay editable
        if let Some(t) = new_time {
            check_slot(t, grid)?;
        }

        if moved {
            ensure_slot_free(conn, &client, &session)?;
        }

        queries::update_session(conn, &session)?;
        ttlog(
            conn,
            "edit",
            &format!("session:{}", session.id),
            &format!("Updated session of '{}'", client.name),
        )?;

        Ok(session)
    }

    pub fn delete(conn: &Connection, scope: &AccessScope, id: i64) -> AppResult<Session> {
        let (session, client) = Self::load_in_scope(conn, scope, id)?;
        queries::delete_session(conn, id)?;

        ttlog(
            conn,
            "del",
            &format!("session:{}", id),
            &format!(
                "Deleted {} {} of '{}'",
                session.date_str(),
                session.time_str(),
                client.name
            ),
        )?;

        Ok(session)
    }

    /// Sessions in scope, optionally for one client, ordered by date and time.
    pub fn list(
        conn: &Connection,
        scope: &AccessScope,
        client_key: Option<&str>,
        period: Period,
    ) -> AppResult<Vec<Session>> {
        let client_id = match client_key {
            Some(k) => Some(ClientLogic::resolve(conn, scope, k)?.id),
            None => None,
        };

        queries::load_sessions(
            conn,
            &SessionQuery {
                clinician_id: scope.clinician_id,
                client_id,
                period,
            },
        )
    }

    pub fn find(conn: &Connection, scope: &AccessScope, id: i64) -> AppResult<Session> {
        Ok(Self::load_in_scope(conn, scope, id)?.0)
    }

    fn load_in_scope(
        conn: &Connection,
        scope: &AccessScope,
        id: i64,
    ) -> AppResult<(Session, Client)> {
        let session = queries::find_session(conn, id)?.ok_or(AppError::SessionNotFound(id))?;
        let client = queries::find_client_by_id(conn, session.client_id)?
            .ok_or_else(|| AppError::ClientNotFound(session.client_id.to_string()))?;
        scope.check_client(&client)?;
        Ok((session, client))
    }
}
