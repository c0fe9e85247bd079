use super::{open_pool, parse_optional_date, resolve_scope};
use crate::cli::parser::{AssessmentAction, Cli, Commands};
use crate::config::Config;
use crate::core::assessment::AssessmentLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::date::today;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Assessment { action } = &cli.command else {
        return Ok(());
    };

    let pool = open_pool(cfg)?;
    let scope = resolve_scope(&pool, cli, None)?;

    match action {
        AssessmentAction::Add {
            client,
            date,
            tags,
            description,
        } => {
            let d = parse_optional_date(date.as_ref())?.unwrap_or_else(today);
            let a = AssessmentLogic::add(&pool.conn, &scope, client, d, tags, description)?;
            success(format!("Assessment {} recorded for {}", a.id, a.date));
        }

        AssessmentAction::List { client } => {
            let items = AssessmentLogic::list(&pool.conn, &scope, client)?;
            if items.is_empty() {
                info("No assessments recorded.");
                return Ok(());
            }

            for a in &items {
                header(format!("#{} {}", a.id, a.date.format("%d/%m/%Y")));
                println!("Tags: {}", colorize_optional(&a.tags));
                println!("{}", a.description);
            }
        }
    }

    Ok(())
}
