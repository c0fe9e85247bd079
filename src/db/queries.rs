use crate::errors::{AppError, AppResult};
use crate::models::assessment::Assessment;
use crate::models::client::Client;
use crate::models::money::Money;
use crate::models::period::Period;
use crate::models::scheduling_day::SchedulingDay;
use crate::models::session::Session;
use crate::models::session_status::SessionStatus;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_db_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(raw.to_string())))
}

fn parse_db_time(raw: &str) -> Result<Option<NaiveTime>> {
    // righe vecchie senza orario
    if raw.trim().is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map(Some)
        .map_err(|_| conversion_error(AppError::InvalidTime(raw.to_string())))
}

fn mood_from_db(v: i64) -> u8 {
    v.clamp(1, 5) as u8
}

pub fn map_client_row(row: &Row) -> Result<Client> {
    let day: String = row.get("dia_agendamento")?;
    Ok(Client {
        id: row.get("id")?,
        name: row.get("nome")?,
        session_price: Money::from_db(row.get("valor_sessao")?),
        clinician_id: row.get("psicologo_responsavel")?,
        scheduling_day: SchedulingDay::from_db_str(&day),
    })
}

pub fn map_session_row(row: &Row) -> Result<Session> {
    let date_str: String = row.get("data")?;
    let time_str: String = row.get("hora")?;
    let status_str: String = row.get("status")?;

    let status = SessionStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(AppError::InvalidStatus(status_str.clone())))?;

    Ok(Session {
        id: row.get("id")?,
        client_id: row.get("cliente_id")?,
        date: parse_db_date(&date_str)?,
        time: parse_db_time(&time_str)?,
        amount: Money::from_db(row.get("valor")?),
        status,
        chargeable_if_missed: row.get::<_, i64>("cobrar")? != 0,
        paid: row.get::<_, i64>("pagamento")? != 0,
        invoice_ref: row.get("nota_fiscal")?,
        content: row.get("conteudo")?,
        goal: row.get("objetivo")?,
        material: row.get("material")?,
        homework: row.get("atividade_casa")?,
        mood_in: mood_from_db(row.get("emocao_entrada")?),
        mood_out: mood_from_db(row.get("emocao_saida")?),
        next_session: row.get("proxima_sessao")?,
        observation: row.get("observacao")?,
    })
}

pub fn map_assessment_row(row: &Row) -> Result<Assessment> {
    let date_str: String = row.get("data")?;
    Ok(Assessment {
        id: row.get("id")?,
        client_id: row.get("cliente_id")?,
        date: parse_db_date(&date_str)?,
        tags: row.get("tags")?,
        description: row.get("descricao")?,
    })
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

pub fn insert_client(
    conn: &Connection,
    name: &str,
    session_price: Money,
    clinician_id: Option<i64>,
    scheduling_day: SchedulingDay,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO clientes (nome, valor_sessao, psicologo_responsavel, dia_agendamento)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            name,
            session_price.to_db(),
            clinician_id,
            scheduling_day.to_db_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_client_by_id(conn: &Connection, id: i64) -> AppResult<Option<Client>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM clientes WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_client_row).optional()?)
}

pub fn find_client_by_name(conn: &Connection, name: &str) -> AppResult<Option<Client>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM clientes WHERE nome = ?1")?;
    Ok(stmt.query_row([name], map_client_row).optional()?)
}

/// True if another client (other than `exclude_id`) already uses `name`.
pub fn client_name_taken(conn: &Connection, name: &str, exclude_id: Option<i64>) -> AppResult<bool> {
    let mut stmt =
        conn.prepare_cached("SELECT 1 FROM clientes WHERE nome = ?1 AND id != ?2 LIMIT 1")?;
    Ok(stmt
        .query_row(params![name, exclude_id.unwrap_or(-1)], |_| Ok(()))
        .optional()?
        .is_some())
}

/// Clients owned by `clinician_id`, or every client when `None`.
/// Ordering is left to the caller (accent-insensitive sort).
pub fn list_clients(conn: &Connection, clinician_id: Option<i64>) -> AppResult<Vec<Client>> {
    let mut out = Vec::new();

    match clinician_id {
        Some(cid) => {
            let mut stmt =
                conn.prepare_cached("SELECT * FROM clientes WHERE psicologo_responsavel = ?1")?;
            for r in stmt.query_map([cid], map_client_row)? {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare_cached("SELECT * FROM clientes")?;
            for r in stmt.query_map([], map_client_row)? {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

pub fn rename_client(conn: &Connection, id: i64, new_name: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE clientes SET nome = ?1 WHERE id = ?2",
        params![new_name, id],
    )?)
}

/// Remove a client together with its sessions and assessments.
/// Returns the number of (sessions, assessments) removed.
pub fn delete_client_cascade(conn: &Connection, id: i64) -> AppResult<(usize, usize)> {
    let tx = conn.unchecked_transaction()?;

    let sessions = tx.execute("DELETE FROM sessoes WHERE cliente_id = ?1", [id])?;
    let assessments = tx.execute("DELETE FROM avaliacoes WHERE cliente_id = ?1", [id])?;
    let removed = tx.execute("DELETE FROM clientes WHERE id = ?1", [id])?;

    if removed == 0 {
        return Err(AppError::ClientNotFound(id.to_string()));
    }

    tx.commit()?;
    Ok((sessions, assessments))
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

pub fn insert_session(conn: &Connection, s: &Session) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO sessoes (
            cliente_id, data, hora, valor, status, cobrar, pagamento, nota_fiscal,
            conteudo, objetivo, material, atividade_casa,
            emocao_entrada, emocao_saida, proxima_sessao, observacao
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
    )?;

    stmt.execute(params![
        s.client_id,
        s.date_str(),
        s.time_str(),
        s.amount.to_db(),
        s.status.to_db_str(),
        s.chargeable_if_missed as i64,
        s.paid as i64,
        s.invoice_ref,
        s.content,
        s.goal,
        s.material,
        s.homework,
        s.mood_in as i64,
        s.mood_out as i64,
        s.next_session,
        s.observation,
    ])?;

    Ok(conn.last_insert_rowid())
}

pub fn update_session(conn: &Connection, s: &Session) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "UPDATE sessoes SET
            data = ?1, hora = ?2, valor = ?3, status = ?4, cobrar = ?5, pagamento = ?6,
            nota_fiscal = ?7, conteudo = ?8, objetivo = ?9, material = ?10,
            atividade_casa = ?11, emocao_entrada = ?12, emocao_saida = ?13,
            proxima_sessao = ?14, observacao = ?15
         WHERE id = ?16",
    )?;

    let changed = stmt.execute(params![
        s.date_str(),
        s.time_str(),
        s.amount.to_db(),
        s.status.to_db_str(),
        s.chargeable_if_missed as i64,
        s.paid as i64,
        s.invoice_ref,
        s.content,
        s.goal,
        s.material,
        s.homework,
        s.mood_in as i64,
        s.mood_out as i64,
        s.next_session,
        s.observation,
        s.id,
    ])?;

    if changed == 0 {
        return Err(AppError::SessionNotFound(s.id));
    }
    Ok(())
}

pub fn delete_session(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM sessoes WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::SessionNotFound(id));
    }
    Ok(())
}

pub fn find_session(conn: &Connection, id: i64) -> AppResult<Option<Session>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM sessoes WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_session_row).optional()?)
}

/// Is the date+time slot already held?
///
/// With a clinician, any session of any of that clinician's clients blocks
/// the slot. Without one, only the client's own sessions do.
/// `exclude_id` lets a session being rescheduled ignore itself.
pub fn slot_taken(
    conn: &Connection,
    clinician_id: Option<i64>,
    client_id: i64,
    date: NaiveDate,
    time: NaiveTime,
    exclude_id: Option<i64>,
) -> AppResult<bool> {
    let date_s = date.format("%Y-%m-%d").to_string();
    let time_s = time.format("%H:%M").to_string();
    let exclude = exclude_id.unwrap_or(-1);

    let found = match clinician_id {
        Some(cid) => {
            let mut stmt = conn.prepare_cached(
                "SELECT 1 FROM sessoes s
                 JOIN clientes c ON c.id = s.cliente_id
                 WHERE c.psicologo_responsavel = ?1
                   AND s.data = ?2 AND s.hora = ?3 AND s.id != ?4
                 LIMIT 1",
            )?;
            stmt.query_row(params![cid, date_s, time_s, exclude], |_| Ok(()))
                .optional()?
        }
        None => {
            let mut stmt = conn.prepare_cached(
                "SELECT 1 FROM sessoes
                 WHERE cliente_id = ?1 AND data = ?2 AND hora = ?3 AND id != ?4
                 LIMIT 1",
            )?;
            stmt.query_row(params![client_id, date_s, time_s, exclude], |_| Ok(()))
                .optional()?
        }
    };

    Ok(found.is_some())
}

/// Filters accepted by [`load_sessions`]. Every filter is optional.
#[derive(Debug, Clone, Copy)]
pub struct SessionQuery {
    pub clinician_id: Option<i64>,
    pub client_id: Option<i64>,
    pub period: Period,
}

impl Default for SessionQuery {
    fn default() -> Self {
        Self {
            clinician_id: None,
            client_id: None,
            period: Period::All,
        }
    }
}

/// Load sessions matching `q`, ordered by date and time.
pub fn load_sessions(conn: &Connection, q: &SessionQuery) -> AppResult<Vec<Session>> {
    let mut sql = String::from(
        "SELECT s.* FROM sessoes s
         JOIN clientes c ON c.id = s.cliente_id
         WHERE 1 = 1",
    );
    let mut values: Vec<Value> = Vec::new();

    if let Some(cid) = q.clinician_id {
        values.push(Value::Integer(cid));
        sql.push_str(&format!(" AND c.psicologo_responsavel = ?{}", values.len()));
    }

    if let Some(client) = q.client_id {
        values.push(Value::Integer(client));
        sql.push_str(&format!(" AND s.cliente_id = ?{}", values.len()));
    }

    if let Some((start, end)) = q.period.bounds() {
        values.push(Value::Text(start.format("%Y-%m-%d").to_string()));
        sql.push_str(&format!(" AND s.data >= ?{}", values.len()));
        values.push(Value::Text(end.format("%Y-%m-%d").to_string()));
        sql.push_str(&format!(" AND s.data <= ?{}", values.len()));
    }

    sql.push_str(" ORDER BY s.data ASC, s.hora ASC, s.id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), map_session_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

pub fn insert_assessment(
    conn: &Connection,
    client_id: i64,
    date: NaiveDate,
    tags: &str,
    description: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO avaliacoes (cliente_id, data, tags, descricao) VALUES (?1, ?2, ?3, ?4)",
        params![client_id, date.format("%Y-%m-%d").to_string(), tags, description],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Assessments of a client, newest first.
pub fn list_assessments(conn: &Connection, client_id: i64) -> AppResult<Vec<Assessment>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM avaliacoes WHERE cliente_id = ?1 ORDER BY data DESC, id DESC",
    )?;
    let rows = stmt.query_map([client_id], map_assessment_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
