use super::{open_pool, parse_date_arg, parse_optional_date, parse_optional_money, resolve_scope};
use crate::cli::parser::{Cli, Commands, DiaryArgs, SessionAction};
use crate::config::Config;
use crate::core::calculator::billing::classify;
use crate::core::client::ClientLogic;
use crate::core::session::{SessionChanges, SessionLogic, SlotGrid};
use crate::errors::{AppError, AppResult};
use crate::models::period::Period;
use crate::models::session_status::SessionStatus;
use crate::ui::messages::{info, success};
use crate::utils::colors::{RESET, color_for_classification};
use crate::utils::format_money;
use crate::utils::table::{Column, Table};
use crate::utils::time::{parse_optional_time, parse_time, slot_grid};
use std::collections::HashMap;

fn parse_status(code: &str) -> AppResult<SessionStatus> {
    SessionStatus::from_code(code).ok_or_else(|| AppError::InvalidStatus(code.to_string()))
}

fn apply_diary(changes: &mut SessionChanges, diary: &DiaryArgs) {
    changes.content = diary.content.clone();
    changes.goal = diary.goal.clone();
    changes.material = diary.material.clone();
    changes.homework = diary.homework.clone();
    changes.mood_in = diary.mood_in;
    changes.mood_out = diary.mood_out;
    changes.next_session = diary.next_session.clone();
    changes.observation = diary.observation.clone();
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Session { action } = &cli.command else {
        return Ok(());
    };

    let grid = SlotGrid::from_config(cfg);

    if let SessionAction::Slots = action {
        let slots: Vec<String> = slot_grid(grid.start_hour, grid.end_hour, grid.step_minutes)
            .iter()
            .map(|t| t.format("%H:%M").to_string())
            .collect();
        println!("{}", slots.join(" "));
        return Ok(());
    }

    let pool = open_pool(cfg)?;

    match action {
        SessionAction::Add {
            client,
            date,
            time,
            amount,
            status,
            chargeable,
            paid,
            invoice_ref,
            diary,
        } => {
            let scope = resolve_scope(&pool, cli, None)?;
            let d = parse_date_arg(date)?;
            let t = parse_time(time).ok_or_else(|| AppError::InvalidTime(time.clone()))?;

            let mut changes = SessionChanges {
                amount: parse_optional_money(amount.as_ref(), &cfg.currency_symbol)?,
                status: Some(parse_status(status)?),
                chargeable_if_missed: Some(*chargeable),
                paid: Some(*paid),
                invoice_ref: invoice_ref.clone(),
                ..Default::default()
            };
            apply_diary(&mut changes, diary);

            let s = SessionLogic::add(&pool.conn, &scope, &grid, client, d, t, changes)?;
            success(format!(
                "Session {} recorded: {} {} {} ({})",
                s.id,
                s.date_str(),
                s.time_str(),
                s.status.as_str(),
                format_money(s.amount, &cfg.currency_symbol)
            ));
        }

        SessionAction::List {
            client,
            period,
            clinician,
        } => {
            let scope = resolve_scope(&pool, cli, *clinician)?;
            let period = match period {
                Some(p) => Period::parse(p)?,
                None => Period::All,
            };

            let sessions = SessionLogic::list(&pool.conn, &scope, client.as_deref(), period)?;
            if sessions.is_empty() {
                info(format!("No sessions for {}.", period.label()));
                return Ok(());
            }

            let names: HashMap<i64, String> = ClientLogic::list(&pool.conn, &scope)?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect();

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Date"),
                Column::left("Time"),
                Column::left("Client"),
                Column::left("Status"),
                Column::right("Amount"),
                Column::left("Billing"),
                Column::left("NF"),
            ]);

            for s in &sessions {
                let class = classify(s);
                table.add_row(vec![
                    s.id.to_string(),
                    s.date.format("%d/%m/%Y").to_string(),
                    s.time_str(),
                    names.get(&s.client_id).cloned().unwrap_or_default(),
                    s.status.as_str().to_string(),
                    format_money(s.amount, &cfg.currency_symbol),
                    class.as_str().to_string(),
                    s.invoice_ref.clone(),
                ]);
            }

            // header and separator first, then one line per session
            let rendered = table.render();
            let mut lines = rendered.lines();
            for line in lines.by_ref().take(2) {
                println!("{}", line);
            }
            for (line, s) in lines.zip(&sessions) {
                println!("{}{}{}", color_for_classification(classify(s)), line, RESET);
            }
        }

        SessionAction::Edit {
            id,
            date,
            time,
            amount,
            status,
            chargeable,
            paid,
            invoice_ref,
            diary,
        } => {
            let scope = resolve_scope(&pool, cli, None)?;

            let mut changes = SessionChanges {
                date: parse_optional_date(date.as_ref())?,
                time: parse_optional_time(time.as_ref())?,
                amount: parse_optional_money(amount.as_ref(), &cfg.currency_symbol)?,
                status: status.as_deref().map(parse_status).transpose()?,
                chargeable_if_missed: *chargeable,
                paid: *paid,
                invoice_ref: invoice_ref.clone(),
                ..Default::default()
            };
            apply_diary(&mut changes, diary);

            if changes.is_empty() {
                info("Nothing to change.");
                return Ok(());
            }

            let s = SessionLogic::update(&pool.conn, &scope, &grid, *id, changes)?;
            success(format!(
                "Session {} updated: {} {} {}",
                s.id,
                s.date_str(),
                s.time_str(),
                classify(&s).as_str()
            ));
        }

        SessionAction::Del { id } => {
            let scope = resolve_scope(&pool, cli, None)?;
            let s = SessionLogic::delete(&pool.conn, &scope, *id)?;
            success(format!(
                "Session {} of {} {} deleted",
                s.id,
                s.date_str(),
                s.time_str()
            ));
        }

        SessionAction::Slots => {}
    }

    Ok(())
}
