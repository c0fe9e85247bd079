pub mod assessment;
pub mod backup;
pub mod client;
pub mod config;
pub mod db;
pub mod document;
pub mod export;
pub mod init;
pub mod log;
pub mod report;
pub mod session;
pub mod user;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::access::AccessScope;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::money::Money;
use crate::utils::date;
use chrono::NaiveDate;

/// Open the configured database with an up-to-date schema.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    DbPool::open_initialized(&cfg.database)
}

/// Scope of a command: `--user` plus an optional `--clinician`.
pub(crate) fn resolve_scope(
    pool: &DbPool,
    cli: &Cli,
    clinician: Option<i64>,
) -> AppResult<AccessScope> {
    AccessScope::resolve(&pool.conn, cli.user.as_deref(), clinician)
}

pub(crate) fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub(crate) fn parse_optional_date(s: Option<&String>) -> AppResult<Option<NaiveDate>> {
    s.map(|v| parse_date_arg(v)).transpose()
}

pub(crate) fn parse_optional_money(s: Option<&String>, symbol: &str) -> AppResult<Option<Money>> {
    s.map(|v| Money::parse(v, symbol)).transpose()
}
