mod common;
use common::{ADMIN, add_reconciliation_sessions, init_practice, run_as, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;

#[test]
fn test_export_sessions_json() {
    let db_path = setup_test_db("export_sessions_json");
    init_practice(&db_path);
    add_reconciliation_sessions(&db_path);

    let out = temp_out("export_sessions_json", "json");

    run_as(
        &db_path,
        Some(ADMIN),
        &["export", "--format", "json", "--file", &out, "--range", "2025-03"],
    )
    .success()
    .stdout(contains("4 record(s) exported"));

    let content = fs::read_to_string(&out).expect("read exported json");
    let records: Vec<serde_json::Value> = serde_json::from_str(&content).expect("valid json");
    assert_eq!(records.len(), 4);

    let classes: Vec<&str> = records
        .iter()
        .map(|r| r["classification"].as_str().unwrap())
        .collect();
    assert_eq!(classes, vec!["paid", "pending", "pending", "not billable"]);
    assert_eq!(records[0]["client"], "João Silva");
    assert_eq!(records[2]["status"], "missed");
    assert_eq!(records[2]["amount"], 50.0);
}

#[test]
fn test_export_sessions_csv_for_client_and_day() {
    let db_path = setup_test_db("export_sessions_csv_client");
    init_practice(&db_path);
    add_reconciliation_sessions(&db_path);

    let out = temp_out("export_sessions_csv_client", "csv");

    run_as(
        &db_path,
        Some(ADMIN),
        &[
            "export",
            "--format",
            "csv",
            "--file",
            &out,
            "--client",
            "João Silva",
            "--range",
            "2025-03-10",
        ],
    )
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    assert!(lines.next().unwrap().starts_with("id,client,date,time,status,amount"));
    let row = lines.next().expect("one session row");
    assert!(row.contains("2025-03-10"));
    assert!(row.contains("pending"));
    assert!(lines.next().is_none());
}

#[test]
fn test_export_summary_csv() {
    let db_path = setup_test_db("export_summary_csv");
    init_practice(&db_path);
    add_reconciliation_sessions(&db_path);

    let out = temp_out("export_summary_csv", "csv");

    run_as(
        &db_path,
        Some(ADMIN),
        &[
            "export", "--what", "summary", "--format", "csv", "--file", &out, "--range", "2025",
        ],
    )
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("client_id,client,sessions_done"));
    assert!(content.contains("João Silva,2,2,250.00,100.00,150.00,2"));
}

#[test]
fn test_export_summary_rejects_client_filter() {
    let db_path = setup_test_db("export_summary_client");
    init_practice(&db_path);

    let out = temp_out("export_summary_client", "csv");

    run_as(
        &db_path,
        Some(ADMIN),
        &[
            "export", "--what", "summary", "--format", "csv", "--file", &out, "--client", "1",
        ],
    )
    .failure();
}

#[test]
fn test_export_xlsx_creates_file() {
    let db_path = setup_test_db("export_sessions_xlsx");
    init_practice(&db_path);
    add_reconciliation_sessions(&db_path);

    let out = temp_out("export_sessions_xlsx", "xlsx");

    run_as(
        &db_path,
        Some(ADMIN),
        &["export", "--format", "xlsx", "--file", &out],
    )
    .success();

    let meta = fs::metadata(&out).expect("xlsx written");
    assert!(meta.len() > 0);
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let db_path = setup_test_db("export_empty_range");
    init_practice(&db_path);

    let out = temp_out("export_empty_range", "json");

    run_as(
        &db_path,
        Some(ADMIN),
        &["export", "--format", "json", "--file", &out, "--range", "2024"],
    )
    .success()
    .stdout(contains("No records found"));

    assert!(fs::metadata(&out).is_err());
}

#[test]
fn test_export_existing_file_needs_force() {
    let db_path = setup_test_db("export_force");
    init_practice(&db_path);
    add_reconciliation_sessions(&db_path);

    let out = temp_out("export_force", "json");
    fs::write(&out, "old").unwrap();

    run_as(
        &db_path,
        Some(ADMIN),
        &["export", "--format", "json", "--file", &out, "--force"],
    )
    .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("classification"));
}
