mod common;
use common::{ADMIN, add_reconciliation_sessions, init_practice, rcl, run_as, setup_test_db};
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn test_session_add_uses_client_price() {
    let db_path = setup_test_db("session_add_price");
    init_practice(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &["session", "add", "João Silva", "2025-03-03", "14:30"],
    )
    .success()
    .stdout(contains("Session 1 recorded: 2025-03-03 14:30 realized (R$ 100.00)"));
}

#[test]
fn test_session_list_shows_classification() {
    let db_path = setup_test_db("session_list_classes");
    init_practice(&db_path);
    add_reconciliation_sessions(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &["session", "list", "--period", "2025-03", "--client", "João Silva"],
    )
    .success()
    .stdout(contains("03/03/2025"))
    .stdout(contains("24/03/2025"))
    .stdout(contains("paid"))
    .stdout(contains("pending"))
    .stdout(contains("not billable"));

    run_as(&db_path, Some(ADMIN), &["session", "list", "-p", "2025-04"])
        .success()
        .stdout(contains("No sessions for April 2025."));
}

#[test]
fn test_session_duplicate_slot_rejected() {
    let db_path = setup_test_db("session_duplicate_slot");
    init_practice(&db_path);

    let args = ["session", "add", "João Silva", "2025-03-03", "09:00"];
    run_as(&db_path, Some(ADMIN), &args).success();
    run_as(&db_path, Some(ADMIN), &args)
        .failure()
        .stderr(contains("Slot already taken: 2025-03-03 at 09:00"));
}

#[test]
fn test_session_field_checks() {
    let db_path = setup_test_db("session_field_checks");
    init_practice(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &["session", "add", "João Silva", "2025-03-03", "09:00", "--nf", "123"],
    )
    .failure()
    .stderr(contains("must start with 'NF-'"));

    run_as(
        &db_path,
        Some(ADMIN),
        &["session", "add", "João Silva", "2025-03-03", "09:10"],
    )
    .failure()
    .stderr(contains("not a bookable slot"));

    run_as(
        &db_path,
        Some(ADMIN),
        &["session", "add", "João Silva", "2025-03-03", "09:00", "--mood-in", "0"],
    )
    .failure()
    .stderr(contains("Invalid mood value 0"));

    run_as(
        &db_path,
        Some(ADMIN),
        &["session", "add", "João Silva", "2025-03-03", "09:00", "--status", "late"],
    )
    .failure()
    .stderr(contains("Invalid session status"));

    run_as(
        &db_path,
        Some(ADMIN),
        &["session", "add", "João Silva", "2025-02-30", "09:00"],
    )
    .failure()
    .stderr(contains("Invalid date format"));
}

#[test]
fn test_session_edit_and_delete() {
    let db_path = setup_test_db("session_edit_delete");
    init_practice(&db_path);
    add_reconciliation_sessions(&db_path);

    // pay the pending realized session
    run_as(
        &db_path,
        Some(ADMIN),
        &["session", "edit", "2", "--paid", "true", "--nf", "NF-0042"],
    )
    .success()
    .stdout(contains("Session 2 updated: 2025-03-10 09:00 paid"));

    // move onto the slot of session 1
    run_as(&db_path, Some(ADMIN), &["session", "edit", "2", "--date", "2025-03-03"])
        .failure()
        .stderr(contains("Slot already taken"));

    run_as(&db_path, Some(ADMIN), &["session", "edit", "2"])
        .success()
        .stdout(contains("Nothing to change."));

    run_as(&db_path, Some(ADMIN), &["session", "del", "4"])
        .success()
        .stdout(contains("Session 4 of 2025-03-24 09:00 deleted"));

    run_as(&db_path, Some(ADMIN), &["session", "del", "4"])
        .failure()
        .stderr(contains("Session not found: 4"));

    run_as(&db_path, Some(ADMIN), &["session", "list"])
        .success()
        .stdout(contains("24/03/2025").not());
}

#[test]
fn test_session_slots() {
    rcl()
        .args(["session", "slots"])
        .assert()
        .success()
        .stdout(contains("08:00 08:30 09:00"))
        .stdout(contains("21:30"))
        .stdout(contains("22:00").not());
}
