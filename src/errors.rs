//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidRange { start: String, end: String },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid session status: {0}")]
    InvalidStatus(String),

    #[error("Invalid scheduling day: {0}")]
    InvalidSchedulingDay(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid document type: {0}")]
    InvalidDocumentType(String),

    #[error("Invalid mood value {0}: expected 1..=5")]
    InvalidMood(i64),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A client named '{0}' already exists")]
    DuplicateClient(String),

    #[error("Slot already taken: {date} at {time}")]
    DuplicateSlot { date: String, time: String },

    #[error("A user named '{0}' already exists")]
    DuplicateUser(String),

    #[error("Invoice reference must start with 'NF-': {0}")]
    InvalidInvoiceRef(String),

    #[error("Password does not meet the criteria: {}", .0.join("; "))]
    WeakPassword(Vec<String>),

    #[error("Current password is incorrect")]
    WrongPassword,

    #[error("Password confirmation does not match")]
    PasswordMismatch,

    // ---------------------------
    // Lookup / access errors
    // ---------------------------
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Session not found: {0}")]
    SessionNotFound(i64),

    #[error("Clinician not found: {0}")]
    ClinicianNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
