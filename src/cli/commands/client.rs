use super::{open_pool, parse_optional_money, resolve_scope};
use crate::cli::parser::{ClientAction, Cli, Commands};
use crate::config::Config;
use crate::core::client::{ClientLogic, ClientOverview};
use crate::db::users::list_clinicians;
use crate::errors::{AppError, AppResult};
use crate::models::money::Money;
use crate::models::period::Period;
use crate::models::scheduling_day::SchedulingDay;
use crate::ui::messages::{field, header, info, success};
use crate::utils::colors::{RESET, color_for_pending};
use crate::utils::date::today;
use crate::utils::format_money;
use crate::utils::table::{Column, Table};
use chrono::Datelike;
use std::collections::HashMap;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Client { action } = &cli.command else {
        return Ok(());
    };

    let pool = open_pool(cfg)?;

    match action {
        ClientAction::Add {
            name,
            price,
            clinician,
            day,
        } => {
            let scope = resolve_scope(&pool, cli, *clinician)?;

            let price = parse_optional_money(price.as_ref(), &cfg.currency_symbol)?
                .unwrap_or_else(|| Money::from_db(cfg.default_session_price));

            let day = match day {
                Some(code) => SchedulingDay::from_code(code)
                    .ok_or_else(|| AppError::InvalidSchedulingDay(code.clone()))?,
                None => SchedulingDay::Undefined,
            };

            let client = ClientLogic::add(&pool.conn, &scope, name, price, *clinician, day)?;
            success(format!(
                "Client '{}' registered (id {}, {} per session)",
                client.name,
                client.id,
                format_money(client.session_price, &cfg.currency_symbol)
            ));
        }

        ClientAction::List { clinician } => {
            let scope = resolve_scope(&pool, cli, *clinician)?;
            let clients = ClientLogic::list(&pool.conn, &scope)?;

            if clients.is_empty() {
                info("No clients found.");
                return Ok(());
            }

            let clinicians: HashMap<i64, String> = list_clinicians(&pool.conn)?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect();

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Name"),
                Column::right("Price"),
                Column::left("Clinician"),
                Column::left("Day"),
            ]);

            for c in &clients {
                table.add_row(vec![
                    c.id.to_string(),
                    c.name.clone(),
                    format_money(c.session_price, &cfg.currency_symbol),
                    c.clinician_id
                        .and_then(|id| clinicians.get(&id).cloned())
                        .unwrap_or_else(|| "--".to_string()),
                    c.scheduling_day.label().to_string(),
                ]);
            }

            print!("{}", table.render());
        }

        ClientAction::Show { client, month } => {
            let scope = resolve_scope(&pool, cli, None)?;

            let (year, month) = match month {
                Some(m) => match Period::parse(m)? {
                    Period::Month { year, month } => (year, month),
                    _ => return Err(AppError::InvalidPeriod(m.clone())),
                },
                None => {
                    let now = today();
                    (now.year(), now.month())
                }
            };

            let overview = ClientLogic::overview(&pool.conn, &scope, client, year, month)?;
            print_overview(&overview, &cfg.currency_symbol);
        }

        ClientAction::Rename { client, new_name } => {
            let scope = resolve_scope(&pool, cli, None)?;
            let renamed = ClientLogic::rename(&pool.conn, &scope, client, new_name)?;
            success(format!("Client {} renamed to '{}'", renamed.id, renamed.name));
        }

        ClientAction::Del { client } => {
            let scope = resolve_scope(&pool, cli, None)?;
            let (removed, sessions, assessments) =
                ClientLogic::delete(&pool.conn, &scope, client)?;
            success(format!(
                "Client '{}' deleted ({} session(s), {} assessment(s))",
                removed.name, sessions, assessments
            ));
        }
    }

    Ok(())
}

fn print_overview(o: &ClientOverview, symbol: &str) {
    let c = &o.client;
    header(format!("{} (#{})", c.name, c.id));

    field(
        "Clinician",
        o.clinician.as_ref().map(|k| k.name.as_str()).unwrap_or("--"),
    );
    field("Session price", format_money(c.session_price, symbol));
    field("Schedule day", c.scheduling_day.label());

    header(o.period.label());
    let t = &o.totals;
    field("Sessions done", t.sessions_done);
    field("Sessions missed", t.sessions_missed);
    field("Received", format_money(t.total_received, symbol));
    field(
        "Pending",
        format!(
            "{}{}{} ({} session(s))",
            color_for_pending(t.total_pending.cents()),
            format_money(t.total_pending, symbol),
            RESET,
            t.pending_items()
        ),
    );
}
