use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists. Migration markers live there.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create every table with the current schema. Tables that already exist
/// are left untouched; their missing columns are added by `ensure_column`.
fn create_base_tables(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS psicologos (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            nome  TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS clientes (
            id                     INTEGER PRIMARY KEY AUTOINCREMENT,
            nome                   TEXT NOT NULL UNIQUE,
            valor_sessao           REAL NOT NULL DEFAULT 0,
            psicologo_responsavel  INTEGER,
            dia_agendamento        TEXT NOT NULL DEFAULT 'Indefinido'
        );

        CREATE TABLE IF NOT EXISTS sessoes (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            cliente_id      INTEGER NOT NULL,
            data            TEXT NOT NULL,
            hora            TEXT NOT NULL DEFAULT '',
            valor           REAL NOT NULL DEFAULT 0,
            status          TEXT NOT NULL DEFAULT 'realizada',
            cobrar          INTEGER NOT NULL DEFAULT 0,
            pagamento       INTEGER NOT NULL DEFAULT 0,
            nota_fiscal     TEXT NOT NULL DEFAULT 'NF-',
            conteudo        TEXT NOT NULL DEFAULT '',
            objetivo        TEXT NOT NULL DEFAULT '',
            material        TEXT NOT NULL DEFAULT '',
            atividade_casa  TEXT NOT NULL DEFAULT '',
            emocao_entrada  INTEGER NOT NULL DEFAULT 3,
            emocao_saida    INTEGER NOT NULL DEFAULT 3,
            proxima_sessao  TEXT NOT NULL DEFAULT '',
            observacao      TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS login (
            id                     INTEGER PRIMARY KEY AUTOINCREMENT,
            usuario                TEXT NOT NULL UNIQUE,
            senha                  TEXT NOT NULL,
            funcao                 TEXT NOT NULL,
            psicologo_responsavel  INTEGER,
            privilegio             INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS avaliacoes (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            cliente_id  INTEGER NOT NULL,
            data        TEXT NOT NULL,
            tags        TEXT NOT NULL DEFAULT '',
            descricao   TEXT NOT NULL DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

/// Columns introduced after the first schema revision.
/// (table, column, DDL fragment)
const LATE_COLUMNS: &[(&str, &str, &str)] = &[
    ("clientes", "psicologo_responsavel", "INTEGER"),
    (
        "clientes",
        "dia_agendamento",
        "TEXT NOT NULL DEFAULT 'Indefinido'",
    ),
    ("sessoes", "pagamento", "INTEGER NOT NULL DEFAULT 0"),
    ("sessoes", "nota_fiscal", "TEXT NOT NULL DEFAULT 'NF-'"),
    ("sessoes", "conteudo", "TEXT NOT NULL DEFAULT ''"),
    ("sessoes", "objetivo", "TEXT NOT NULL DEFAULT ''"),
    ("sessoes", "material", "TEXT NOT NULL DEFAULT ''"),
    ("sessoes", "atividade_casa", "TEXT NOT NULL DEFAULT ''"),
    ("sessoes", "emocao_entrada", "INTEGER NOT NULL DEFAULT 3"),
    ("sessoes", "emocao_saida", "INTEGER NOT NULL DEFAULT 3"),
    ("sessoes", "proxima_sessao", "TEXT NOT NULL DEFAULT ''"),
    ("sessoes", "observacao", "TEXT NOT NULL DEFAULT ''"),
    ("login", "psicologo_responsavel", "INTEGER"),
    ("login", "privilegio", "INTEGER NOT NULL DEFAULT 0"),
];

pub fn table_has_column(conn: &Connection, table: &str, column: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_already_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Add `column` to `table` when an older database lacks it.
fn ensure_column(conn: &Connection, table: &str, column: &str, ddl: &str) -> AppResult<()> {
    if table_has_column(conn, table, column)? {
        return Ok(());
    }

    conn.execute(
        &format!("ALTER TABLE {} ADD COLUMN {} {};", table, column, ddl),
        [],
    )
    .map_err(|e| AppError::Migration(format!("failed to add '{}.{}': {}", table, column, e)))?;

    let version = format!("add_column_{}_{}", table, column);
    mark_migration_applied(
        conn,
        &version,
        &format!("Added '{}' to {}", column, table),
    )?;

    success(format!(
        "Migration applied: {} → added '{}' to {} table",
        version, column, table
    ));
    Ok(())
}

/// Sessions once carried a third status, `cancelada`, that meant the same
/// thing as `falta`. Fold it into `falta` so the reconciliation engine only
/// ever sees two states.
fn migrate_cancelled_to_missed(conn: &Connection) -> AppResult<()> {
    let version = "20240301_0001_cancelada_to_falta";

    if migration_already_applied(conn, version)? {
        return Ok(());
    }

    let changed = conn.execute(
        "UPDATE sessoes SET status = 'falta' WHERE status = 'cancelada'",
        [],
    )?;

    mark_migration_applied(
        conn,
        version,
        &format!("Converted {} 'cancelada' sessions to 'falta'", changed),
    )?;

    if changed > 0 {
        warning(format!(
            "Migration applied: {} → {} cancelled session(s) now count as missed",
            version, changed
        ));
    }

    Ok(())
}

fn create_indexes(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sessoes_cliente_data ON sessoes(cliente_id, data);
        CREATE INDEX IF NOT EXISTS idx_sessoes_data_hora ON sessoes(data, hora);
        CREATE INDEX IF NOT EXISTS idx_clientes_psicologo ON clientes(psicologo_responsavel);
        CREATE INDEX IF NOT EXISTS idx_avaliacoes_cliente ON avaliacoes(cliente_id, data);
        "#,
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by `db::initialize::init_db()` on every start.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;
    create_base_tables(conn)?;

    for (table, column, ddl) in LATE_COLUMNS {
        ensure_column(conn, table, column, ddl)?;
    }

    migrate_cancelled_to_missed(conn)?;
    create_indexes(conn)?;

    Ok(())
}
