use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};
use rusqlite::Connection;

/// Rows pointing at a client that no longer exists. Older databases were
/// written without foreign keys.
const ORPHAN_CHECKS: &[(&str, &str)] = &[
    (
        "sessions",
        "SELECT COUNT(*) FROM sessoes s
         LEFT JOIN clientes c ON c.id = s.cliente_id WHERE c.id IS NULL",
    ),
    (
        "assessments",
        "SELECT COUNT(*) FROM avaliacoes a
         LEFT JOIN clientes c ON c.id = a.cliente_id WHERE c.id IS NULL",
    ),
];

fn start(label: &str) {
    println!("{}▶ {}…{}", CYAN, label, RESET);
}

fn done(label: &str) {
    println!("{}✔ {}{}\n", GREEN, label, RESET);
}

fn check(conn: &Connection) -> AppResult<()> {
    start("Running integrity check");

    let integrity: String = conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    if integrity != "ok" {
        println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
        return Ok(());
    }

    for (what, sql) in ORPHAN_CHECKS {
        let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
        if n > 0 {
            warning(format!("{} {} belong to a deleted client", n, what));
        }
    }

    done("Integrity check passed.");
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check: run_check,
        vacuum,
        info,
    } = cmd
    else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    if *migrate {
        start("Running migrations");
        init_db(&pool.conn)?;
        done("Migration completed.");
    }

    if *info {
        stats::print_db_info(&pool, &cfg.database)?;
    }

    if *run_check {
        check(&pool.conn)?;
    }

    if *vacuum {
        start("Running VACUUM");
        pool.conn.execute_batch("VACUUM;")?;
        done("Vacuum completed.");
    }

    Ok(())
}
