mod common;
use common::{ADMIN, add_reconciliation_sessions, init_practice, run_as, setup_test_db};
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn test_report_month_totals() {
    let db_path = setup_test_db("report_month");
    init_practice(&db_path);
    add_reconciliation_sessions(&db_path);

    run_as(&db_path, Some(ADMIN), &["report", "month", "2025-03"])
        .success()
        .stdout(contains("=== March 2025 ==="))
        .stdout(contains("Sessions done   : 2"))
        .stdout(contains("Sessions missed : 2"))
        .stdout(contains("Billable        : R$ 250.00"))
        .stdout(contains("Received        : R$ 100.00"))
        .stdout(contains("R$ 150.00"))
        .stdout(contains("(1 realized, 1 missed chargeable)"));
}

#[test]
fn test_report_month_rejects_other_shapes() {
    let db_path = setup_test_db("report_month_shape");
    init_practice(&db_path);

    run_as(&db_path, Some(ADMIN), &["report", "month", "2025"])
        .failure()
        .stderr(contains("Invalid period"));
}

#[test]
fn test_report_year_lists_months() {
    let db_path = setup_test_db("report_year");
    init_practice(&db_path);
    add_reconciliation_sessions(&db_path);

    run_as(&db_path, Some(ADMIN), &["report", "year", "2025"])
        .success()
        .stdout(contains("=== Year 2025 ==="))
        .stdout(contains("January"))
        .stdout(contains("December"))
        .stdout(contains("João Silva"));
}

#[test]
fn test_report_global_lists_idle_clients() {
    let db_path = setup_test_db("report_global");
    init_practice(&db_path);
    add_reconciliation_sessions(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &["client", "add", "Zélia", "--price", "80"],
    )
    .success();

    run_as(&db_path, Some(ADMIN), &["report", "global"])
        .success()
        .stdout(contains("=== All sessions ==="))
        .stdout(contains("João Silva"))
        .stdout(contains("Zélia"));
}

#[test]
fn test_report_pending_range() {
    let db_path = setup_test_db("report_pending");
    init_practice(&db_path);
    add_reconciliation_sessions(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &["report", "pending", "--from", "2025-03-01", "--to", "2025-03-31"],
    )
    .success()
    .stdout(contains("Pending from 01/03/2025 to 31/03/2025"))
    .stdout(contains("João Silva"))
    .stdout(contains("Total pending:"))
    .stdout(contains("R$ 150.00"))
    .stdout(contains("in 2 session(s)"));

    // the chargeable missed session alone
    run_as(
        &db_path,
        Some(ADMIN),
        &["report", "pending", "--from", "2025-03-15", "--to", "2025-03-20"],
    )
    .success()
    .stdout(contains("R$ 50.00"))
    .stdout(contains("in 1 session(s)"));

    run_as(
        &db_path,
        Some(ADMIN),
        &["report", "pending", "--from", "2025-04-01", "--to", "2025-04-30"],
    )
    .success()
    .stdout(contains("No pending payments in this range."))
    .stdout(contains("Total pending").not());
}

#[test]
fn test_report_pending_inverted_range() {
    let db_path = setup_test_db("report_pending_inverted");
    init_practice(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &["report", "pending", "--from", "2025-03-31", "--to", "2025-03-01"],
    )
    .failure()
    .stderr(contains("end 2025-03-01 is before start 2025-03-31"));
}
