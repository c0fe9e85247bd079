use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Log { print } = cmd else {
        return Ok(());
    };

    if !*print {
        info("Use --print to show the audit log.");
        return Ok(());
    }

    let pool = super::open_pool(cfg)?;
    LogLogic::print_log(&pool)
}
