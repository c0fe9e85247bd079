use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::{SCHEMA_VERSION, init_db};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users::count_users;
use crate::errors::AppResult;
use crate::ui::messages::{field, info, success};

/// `init`: config directory and file (not in test mode), then the database
/// with every migration applied.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?
        .to_string_lossy()
        .to_string();

    if !cli.test {
        field("Config file", Config::config_file().display());
    }
    field("Database", &db_path);

    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;
    ttlog(
        &pool.conn,
        "init",
        &db_path,
        &format!("Schema v{} ready", SCHEMA_VERSION),
    )?;

    success(format!("Database initialized at {}", db_path));

    if count_users(&pool.conn)? == 0 {
        info("No accounts yet: the first `rclinic user add` becomes the administrator.");
    }
    Ok(())
}
