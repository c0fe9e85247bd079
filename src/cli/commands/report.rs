use super::{open_pool, parse_optional_date, resolve_scope};
use crate::cli::parser::{Cli, Commands, ReportAction};
use crate::config::Config;
use crate::core::calculator::pending::PendingReport;
use crate::core::calculator::totals::Totals;
use crate::core::report::{MonthTotals, ReportLogic};
use crate::errors::{AppError, AppResult};
use crate::models::financial_summary::FinancialSummary;
use crate::models::period::Period;
use crate::ui::messages::{field, header, info, warning};
use crate::utils::colors::{RESET, color_for_pending};
use crate::utils::date::{month_name, today};
use crate::utils::format_money;
use crate::utils::table::{Column, Table};
use chrono::Datelike;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Report { action } = &cli.command else {
        return Ok(());
    };

    let pool = open_pool(cfg)?;
    let symbol = cfg.currency_symbol.as_str();

    match action {
        ReportAction::Global { clinician } => {
            let scope = resolve_scope(&pool, cli, *clinician)?;
            let summary = ReportLogic::summary(&pool.conn, &scope, Period::All)?;
            print_summary(&summary, symbol);
        }

        ReportAction::Year { year, clinician } => {
            let scope = resolve_scope(&pool, cli, *clinician)?;
            let year = year.unwrap_or_else(|| today().year());
            if year < cfg.first_year {
                warning(format!(
                    "{} is before the first year of activity ({})",
                    year, cfg.first_year
                ));
            }

            let summary = ReportLogic::summary(&pool.conn, &scope, Period::Year(year))?;
            print_summary(&summary, symbol);

            let months = ReportLogic::months_of_year(&pool.conn, &scope, year)?;
            print_months(&months, symbol);
        }

        ReportAction::Month { month, clinician } => {
            let scope = resolve_scope(&pool, cli, *clinician)?;
            let period = match month {
                Some(m) => match Period::parse(m)? {
                    p @ Period::Month { .. } => p,
                    _ => return Err(AppError::InvalidPeriod(m.clone())),
                },
                None => {
                    let now = today();
                    Period::month(now.year(), now.month())?
                }
            };

            let summary = ReportLogic::summary(&pool.conn, &scope, period)?;
            print_summary(&summary, symbol);
        }

        ReportAction::Pending {
            from,
            to,
            clinician,
        } => {
            let scope = resolve_scope(&pool, cli, *clinician)?;
            let report = ReportLogic::pending(
                &pool.conn,
                &scope,
                parse_optional_date(from.as_ref())?,
                parse_optional_date(to.as_ref())?,
            )?;
            print_pending(&report, symbol);
        }
    }

    Ok(())
}

fn print_totals(t: &Totals, symbol: &str) {
    field("Sessions done", t.sessions_done);
    field("Sessions missed", t.sessions_missed);
    field("Billable", format_money(t.total_billable, symbol));
    field("Received", format_money(t.total_received, symbol));
    field(
        "Pending",
        format!(
            "{}{}{} ({} realized, {} missed chargeable)",
            color_for_pending(t.total_pending.cents()),
            format_money(t.total_pending, symbol),
            RESET,
            t.realized_pending,
            t.missed_chargeable_pending
        ),
    );
}

fn print_summary(summary: &FinancialSummary, symbol: &str) {
    header(summary.period.label());
    print_totals(&summary.totals, symbol);

    if summary.clients.is_empty() {
        info("No clients in scope.");
        return;
    }

    println!();
    let mut table = Table::new(vec![
        Column::left("Client"),
        Column::right("Done"),
        Column::right("Missed"),
        Column::right("Received"),
        Column::right("Pending"),
    ]);

    for c in &summary.clients {
        table.add_row(vec![
            c.name.clone(),
            c.totals.sessions_done.to_string(),
            c.totals.sessions_missed.to_string(),
            format_money(c.totals.total_received, symbol),
            format_money(c.totals.total_pending, symbol),
        ]);
    }
    print!("{}", table.render());
}

fn print_months(months: &[MonthTotals], symbol: &str) {
    println!();
    let mut table = Table::new(vec![
        Column::left("Month"),
        Column::right("Done"),
        Column::right("Missed"),
        Column::right("Received"),
        Column::right("Pending"),
    ]);

    for m in months {
        table.add_row(vec![
            month_name(m.month).to_string(),
            m.totals.sessions_done.to_string(),
            m.totals.sessions_missed.to_string(),
            format_money(m.totals.total_received, symbol),
            format_money(m.totals.total_pending, symbol),
        ]);
    }
    print!("{}", table.render());
}

fn print_pending(report: &PendingReport, symbol: &str) {
    header(format!(
        "Pending from {} to {}",
        report.start.format("%d/%m/%Y"),
        report.end.format("%d/%m/%Y")
    ));

    if report.rows.is_empty() {
        info("No pending payments in this range.");
        return;
    }

    let mut table = Table::new(vec![
        Column::left("Client"),
        Column::right("Pending"),
        Column::right("Realized"),
        Column::right("Missed chargeable"),
    ]);

    for r in &report.rows {
        table.add_row(vec![
            r.name.clone(),
            format_money(r.pending, symbol),
            r.realized_pending.to_string(),
            r.missed_chargeable_pending.to_string(),
        ]);
    }
    print!("{}", table.render());

    println!(
        "\nTotal pending: {}{}{} in {} session(s)",
        color_for_pending(report.total_pending.cents()),
        format_money(report.total_pending, symbol),
        RESET,
        report.total_items
    );
}
