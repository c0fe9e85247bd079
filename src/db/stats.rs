use crate::db::initialize::schema_version;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, table: &str) -> AppResult<i64> {
    Ok(pool
        .conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })?)
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!(
        "{}• Schema:{} v{}",
        CYAN,
        RESET,
        schema_version(&pool.conn)?
    );

    //
    // 2) ROW COUNTS
    //
    for (label, table) in [
        ("Clinicians", "psicologos"),
        ("Users", "login"),
        ("Clients", "clientes"),
        ("Sessions", "sessoes"),
        ("Assessments", "avaliacoes"),
    ] {
        println!(
            "{}• {}:{} {}{}{}",
            CYAN,
            label,
            RESET,
            GREEN,
            count(pool, table)?,
            RESET
        );
    }

    //
    // 3) SESSION DATE RANGE
    //
    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row("SELECT MIN(data), MAX(data) FROM sessoes", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .optional()?;

    let (first, last) = range.unwrap_or((None, None));
    let fmt = |d: Option<String>| d.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Session dates:{}", CYAN, RESET);
    println!("    from: {}", fmt(first));
    println!("    to:   {}", fmt(last));

    println!();
    Ok(())
}
