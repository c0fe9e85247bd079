mod common;
use common::{ADMIN, add_reconciliation_sessions, init_practice, run_as, setup_test_db};
use predicates::str::contains;

#[test]
fn test_client_add_and_list() {
    let db_path = setup_test_db("client_add_list");
    init_practice(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &["client", "add", "Ana Beatriz", "--price", "150,50", "--day", "wed"],
    )
    .success()
    .stdout(contains("Client 'Ana Beatriz' registered"))
    .stdout(contains("R$ 150.50 per session"));

    run_as(&db_path, Some(ADMIN), &["client", "list"])
        .success()
        .stdout(contains("Ana Beatriz"))
        .stdout(contains("João Silva"))
        .stdout(contains("Wednesday"))
        .stdout(contains("ana"));
}

#[test]
fn test_client_price_formats() {
    let db_path = setup_test_db("client_price_formats");
    init_practice(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &["client", "add", "Åsa Berg", "--price", "R$ 1,234.50"],
    )
    .success()
    .stdout(contains("R$ 1,234.50 per session"));

    run_as(
        &db_path,
        Some(ADMIN),
        &["client", "add", "Paula", "--price", "abc5"],
    )
    .failure()
    .stderr(contains("Invalid amount: abc5"));
}

#[test]
fn test_client_duplicate_name_rejected() {
    let db_path = setup_test_db("client_duplicate");
    init_practice(&db_path);

    run_as(&db_path, Some(ADMIN), &["client", "add", "João Silva"])
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn test_client_invalid_day_rejected() {
    let db_path = setup_test_db("client_invalid_day");
    init_practice(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &["client", "add", "Paula", "--day", "sunday"],
    )
    .failure()
    .stderr(contains("Invalid scheduling day"));
}

#[test]
fn test_client_show_month() {
    let db_path = setup_test_db("client_show_month");
    init_practice(&db_path);
    add_reconciliation_sessions(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &["client", "show", "João Silva", "--month", "2025-03"],
    )
    .success()
    .stdout(contains("Sessions done   : 2"))
    .stdout(contains("Sessions missed : 2"))
    .stdout(contains("Received        : R$ 100.00"))
    .stdout(contains("R$ 150.00"))
    .stdout(contains("(2 session(s))"));

    // by id, a month without sessions
    run_as(&db_path, Some(ADMIN), &["client", "show", "1", "--month", "2025-04"])
        .success()
        .stdout(contains("Sessions done   : 0"));
}

#[test]
fn test_client_rename_and_delete_cascade() {
    let db_path = setup_test_db("client_rename_delete");
    init_practice(&db_path);
    add_reconciliation_sessions(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &["client", "rename", "João Silva", "João P. Silva"],
    )
    .success()
    .stdout(contains("renamed to 'João P. Silva'"));

    run_as(&db_path, Some(ADMIN), &["client", "del", "João P. Silva"])
        .success()
        .stdout(contains("4 session(s), 0 assessment(s)"));

    run_as(&db_path, Some(ADMIN), &["session", "list"])
        .success()
        .stdout(contains("No sessions"));

    run_as(&db_path, Some(ADMIN), &["client", "show", "João P. Silva"])
        .failure()
        .stderr(contains("Client not found"));
}

#[test]
fn test_client_of_other_clinician_is_hidden() {
    let db_path = setup_test_db("client_other_clinician");
    init_practice(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &[
            "user",
            "add",
            "paulo",
            "--password",
            "Outra#2025",
            "--role",
            "clinician",
        ],
    )
    .success();

    run_as(&db_path, Some("paulo"), &["client", "list"])
        .success()
        .stdout(contains("No clients found."));

    run_as(&db_path, Some("paulo"), &["client", "show", "João Silva"])
        .failure()
        .stderr(contains("Permission denied"));

    // the admin may look into paulo's practice
    run_as(&db_path, Some(ADMIN), &["client", "list", "--clinician", "2"])
        .success()
        .stdout(contains("No clients found."));
}
