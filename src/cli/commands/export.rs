use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::models::period::Period;
use crate::ui::messages::info;
use crate::utils::path::expand_tilde;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        what,
        format,
        file,
        range,
        clinician,
        client,
        force,
    } = &cli.command
    {
        let period = match range {
            Some(r) => Period::parse(r)?,
            None => Period::All,
        };

        let pool = super::open_pool(cfg)?;
        let scope = super::resolve_scope(&pool, cli, *clinician)?;
        let out = expand_tilde(file);

        let n = ExportLogic::export(
            &pool,
            &scope,
            *what,
            *format,
            &out.to_string_lossy(),
            period,
            client.as_deref(),
            *force,
        )?;

        if n > 0 {
            info(format!("{} record(s) exported", n));
        }
    }
    Ok(())
}
