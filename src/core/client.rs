use super::access::AccessScope;
use super::calculator::totals::Totals;
use crate::db::log::ttlog;
use crate::db::queries::{self, SessionQuery};
use crate::db::users::find_clinician;
use crate::errors::{AppError, AppResult};
use crate::models::client::Client;
use crate::models::money::Money;
use crate::models::period::Period;
use crate::models::scheduling_day::SchedulingDay;
use crate::models::user::Clinician;
use crate::utils::text::sort_key;
use rusqlite::Connection;

/// Client record plus its indicators for one month.
#[derive(Debug, Clone)]
pub struct ClientOverview {
    pub client: Client,
    pub clinician: Option<Clinician>,
    pub period: Period,
    pub totals: Totals,
}

fn normalized_name(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation("client name cannot be empty".into()));
    }
    Ok(name.to_string())
}

pub struct ClientLogic;

impl ClientLogic {
    /// Look a client up by numeric id or exact name, within `scope`.
    pub fn resolve(conn: &Connection, scope: &AccessScope, key: &str) -> AppResult<Client> {
        let key = key.trim();

        let found = match key.parse::<i64>() {
            Ok(id) => match queries::find_client_by_id(conn, id)? {
                Some(c) => Some(c),
                None => queries::find_client_by_name(conn, key)?,
            },
            Err(_) => queries::find_client_by_name(conn, key)?,
        };

        let client = found.ok_or_else(|| AppError::ClientNotFound(key.to_string()))?;
        scope.check_client(&client)?;
        Ok(client)
    }

    /// Register a new client. Without an explicit clinician the client is
    /// assigned to the scope's clinician.
    pub fn add(
        conn: &Connection,
        scope: &AccessScope,
        name: &str,
        session_price: Money,
        clinician: Option<i64>,
        scheduling_day: SchedulingDay,
    ) -> AppResult<Client> {
        let name = normalized_name(name)?;

        let clinician_id = clinician.or(scope.clinician_id);
        if let Some(cid) = clinician_id
            && find_clinician(conn, cid)?.is_none()
        {
            return Err(AppError::ClinicianNotFound(cid.to_string()));
        }

        let client = Client {
            id: 0,
            name,
            session_price,
            clinician_id,
            scheduling_day,
        };
        scope.check_client(&client)?;

        if queries::client_name_taken(conn, &client.name, None)? {
            return Err(AppError::DuplicateClient(client.name));
        }

        let id = queries::insert_client(
            conn,
            &client.name,
            client.session_price,
            client.clinician_id,
            client.scheduling_day,
        )?;

        ttlog(
            conn,
            "add",
            &format!("client:{}", client.name),
            &format!("Client registered by {}", scope.actor_name()),
        )?;

        Ok(Client { id, ..client })
    }

    /// Clients in scope, sorted by name ignoring accents and case.
    pub fn list(conn: &Connection, scope: &AccessScope) -> AppResult<Vec<Client>> {
        let mut clients = queries::list_clients(conn, scope.clinician_id)?;
        clients.sort_by(|a, b| {
            sort_key(&a.name)
                .cmp(&sort_key(&b.name))
                .then(a.id.cmp(&b.id))
        });
        Ok(clients)
    }

    /// Client record plus done/missed/received/pending for `year`-`month`.
    pub fn overview(
        conn: &Connection,
        scope: &AccessScope,
        key: &str,
        year: i32,
        month: u32,
    ) -> AppResult<ClientOverview> {
        let client = Self::resolve(conn, scope, key)?;
        let period = Period::month(year, month)?;

        let sessions = queries::load_sessions(
            conn,
            &SessionQuery {
                clinician_id: None,
                client_id: Some(client.id),
                period,
            },
        )?;

        let clinician = match client.clinician_id {
            Some(cid) => find_clinician(conn, cid)?,
            None => None,
        };

        Ok(ClientOverview {
            totals: Totals::from_sessions(&sessions),
            client,
            clinician,
            period,
        })
    }

    pub fn rename(
        conn: &Connection,
        scope: &AccessScope,
        key: &str,
        new_name: &str,
    ) -> AppResult<Client> {
        let mut client = Self::resolve(conn, scope, key)?;
        let new_name = normalized_name(new_name)?;

        if queries::client_name_taken(conn, &new_name, Some(client.id))? {
            return Err(AppError::DuplicateClient(new_name));
        }

        queries::rename_client(conn, client.id, &new_name)?;
        ttlog(
            conn,
            "edit",
            &format!("client:{}", new_name),
            &format!("Renamed from '{}'", client.name),
        )?;

        client.name = new_name;
        Ok(client)
    }

    /// Delete a client with its sessions and assessments.
    /// Returns the client and the number of sessions and assessments removed.
    pub fn delete(
        conn: &Connection,
        scope: &AccessScope,
        key: &str,
    ) -> AppResult<(Client, usize, usize)> {
        let client = Self::resolve(conn, scope, key)?;
        let (sessions, assessments) = queries::delete_client_cascade(conn, client.id)?;

        ttlog(
            conn,
            "del",
            &format!("client:{}", client.name),
            &format!(
                "Deleted with {} session(s) and {} assessment(s)",
                sessions, assessments
            ),
        )?;

        Ok((client, sessions, assessments))
    }
}
