mod common;
use common::{ADMIN, add_reconciliation_sessions, init_db, init_practice, run_as, setup_test_db, temp_out};
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("misc_init");
    init_db(&db_path);

    assert!(fs::metadata(&db_path).is_ok());

    run_as(&db_path, None, &["db", "--check"])
        .success()
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_db_info_counts_rows() {
    let db_path = setup_test_db("misc_db_info");
    init_practice(&db_path);
    add_reconciliation_sessions(&db_path);

    run_as(&db_path, None, &["db", "--info"])
        .success()
        .stdout(contains("Clients:"))
        .stdout(contains("Sessions:"))
        .stdout(contains("2025-03-03"))
        .stdout(contains("2025-03-24"));
}

#[test]
fn test_db_migrate_is_repeatable() {
    let db_path = setup_test_db("misc_db_migrate");
    init_db(&db_path);

    run_as(&db_path, None, &["db", "--migrate"])
        .success()
        .stdout(contains("Migration completed"));
    run_as(&db_path, None, &["db", "--migrate", "--vacuum"])
        .success()
        .stdout(contains("Vacuum completed"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("misc_log");
    init_practice(&db_path);

    run_as(&db_path, None, &["log", "--print"])
        .success()
        .stdout(contains("init"))
        .stdout(contains("user:ana"))
        .stdout(contains("client:João Silva"));
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("misc_backup");
    init_practice(&db_path);

    let plain = temp_out("misc_backup", "sqlite");
    run_as(&db_path, None, &["backup", "--file", &plain])
        .success()
        .stdout(contains("Backup created"));
    assert!(fs::metadata(&plain).unwrap().len() > 0);

    let zipped = temp_out("misc_backup_zip", "sqlite");
    let zip_path = zipped.replace(".sqlite", ".zip");
    fs::remove_file(&zip_path).ok();

    run_as(&db_path, None, &["backup", "--file", &zipped, "--compress"])
        .success()
        .stdout(contains(".zip"));
    assert!(fs::metadata(&zip_path).is_ok());
}

#[test]
fn test_backup_requires_absolute_path() {
    let db_path = setup_test_db("misc_backup_relative");
    init_db(&db_path);

    run_as(&db_path, None, &["backup", "--file", "relative.sqlite"])
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_assessments_newest_first() {
    let db_path = setup_test_db("misc_assessments");
    init_practice(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &[
            "assessment",
            "add",
            "João Silva",
            "--date",
            "2025-01-10",
            "--tags",
            "ansiedade, ,tcc",
            "--description",
            "Initial interview",
        ],
    )
    .success()
    .stdout(contains("recorded for 2025-01-10"));

    run_as(
        &db_path,
        Some(ADMIN),
        &[
            "assessment",
            "add",
            "João Silva",
            "--date",
            "2025-02-14",
            "--description",
            "Follow-up",
        ],
    )
    .success();

    let out = run_as(&db_path, Some(ADMIN), &["assessment", "list", "João Silva"])
        .success()
        .stdout(contains("ansiedade, tcc"))
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    let newer = text.find("Follow-up").unwrap();
    let older = text.find("Initial interview").unwrap();
    assert!(newer < older);

    run_as(
        &db_path,
        Some(ADMIN),
        &["assessment", "add", "João Silva", "--description", "  "],
    )
    .failure()
    .stderr(contains("description cannot be empty"));
}

#[test]
fn test_document_keys() {
    let db_path = setup_test_db("misc_documents");
    init_practice(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &["document", "key", "1", "--type", "reports", "--name", "laudo final.pdf"],
    )
    .success()
    .stdout(contains("João Silva/Laudos/Laudos_laudo_final.pdf"));

    run_as(
        &db_path,
        None,
        &["document", "template", "--type", "contracts", "--name", "padrão"],
    )
    .success()
    .stdout(contains("modelos/Contratos/Contratos_padrão.pdf"));

    run_as(&db_path, Some(ADMIN), &["document", "folders", "João Silva"])
        .success()
        .stdout(contains("João Silva/Notas Fiscais/"))
        .stdout(contains("João Silva/Contrato/"));

    run_as(
        &db_path,
        Some(ADMIN),
        &["document", "key", "1", "--type", "photos", "--name", "x"],
    )
    .failure()
    .stderr(contains("Invalid document type"));
}

#[test]
fn test_config_print() {
    let db_path = setup_test_db("misc_config_print");

    run_as(&db_path, None, &["config", "--print"])
        .success()
        .stdout(contains("currency_symbol"))
        .stdout(contains("slot_minutes"))
        .stdout(contains(db_path.as_str()).or(contains("database")));
}
