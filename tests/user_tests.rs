mod common;
use common::{ADMIN, ADMIN_PASSWORD, init_db, init_practice, run_as, setup_test_db};
use predicates::prelude::*;
use predicates::str::contains;

fn add_assistant(db_path: &str) {
    run_as(
        db_path,
        Some(ADMIN),
        &[
            "user",
            "add",
            "bia",
            "--password",
            "Assist@01",
            "--role",
            "assistant",
            "--responsible",
            "1",
        ],
    )
    .success()
    .stdout(contains("User 'bia' created as assistant"));
}

#[test]
fn test_first_user_becomes_admin() {
    let db_path = setup_test_db("user_bootstrap");
    init_db(&db_path);

    run_as(
        &db_path,
        None,
        &[
            "user",
            "add",
            ADMIN,
            "--password",
            ADMIN_PASSWORD,
            "--role",
            "clinician",
        ],
    )
    .success()
    .stdout(contains("(admin)"));

    run_as(&db_path, None, &["user", "clinicians"])
        .success()
        .stdout(contains("ana"));
}

#[test]
fn test_weak_password_rejected() {
    let db_path = setup_test_db("user_weak_password");
    init_db(&db_path);

    run_as(
        &db_path,
        None,
        &["user", "add", "ana", "--password", "abc", "--role", "clinician"],
    )
    .failure()
    .stderr(contains("at least 8 characters"))
    .stderr(contains("at least one uppercase letter"));
}

#[test]
fn test_second_user_needs_admin() {
    let db_path = setup_test_db("user_needs_admin");
    init_practice(&db_path);

    run_as(
        &db_path,
        None,
        &[
            "user",
            "add",
            "bia",
            "--password",
            "Assist@01",
            "--role",
            "assistant",
            "--responsible",
            "1",
        ],
    )
    .failure()
    .stderr(contains("Permission denied"));

    add_assistant(&db_path);

    // a non-admin cannot manage accounts
    run_as(&db_path, Some("bia"), &["user", "promote", "bia"])
        .failure()
        .stderr(contains("Permission denied"));
}

#[test]
fn test_assistant_needs_responsible_clinician() {
    let db_path = setup_test_db("user_assistant_responsible");
    init_practice(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &[
            "user",
            "add",
            "bia",
            "--password",
            "Assist@01",
            "--role",
            "assistant",
        ],
    )
    .failure()
    .stderr(contains("responsible clinician"));
}

#[test]
fn test_clinician_rejects_responsible() {
    let db_path = setup_test_db("user_clinician_responsible");
    init_practice(&db_path);

    run_as(
        &db_path,
        Some(ADMIN),
        &[
            "user",
            "add",
            "paulo",
            "--password",
            "Clinic@01",
            "--role",
            "clinician",
            "--responsible",
            "1",
        ],
    )
    .failure()
    .stderr(contains("drop --responsible"));

    run_as(&db_path, Some(ADMIN), &["user", "list"])
        .success()
        .stdout(contains("paulo").not());
}

#[test]
fn test_assistant_sees_clinician_clients() {
    let db_path = setup_test_db("user_assistant_scope");
    init_practice(&db_path);
    add_assistant(&db_path);

    run_as(&db_path, Some("bia"), &["client", "list"])
        .success()
        .stdout(contains("João Silva"));

    run_as(&db_path, Some("bia"), &["client", "list", "--clinician", "1"]).success();
}

#[test]
fn test_promote_grant_revoke() {
    let db_path = setup_test_db("user_promote_grant");
    init_practice(&db_path);
    add_assistant(&db_path);

    run_as(&db_path, Some(ADMIN), &["user", "promote", "bia"])
        .success()
        .stdout(contains("User 'bia' is now a clinician"));

    run_as(&db_path, Some(ADMIN), &["user", "revoke", "bia"])
        .success()
        .stdout(contains("no longer an administrator"));

    run_as(&db_path, Some(ADMIN), &["user", "grant", "bia"])
        .success()
        .stdout(contains("now an administrator"));

    run_as(&db_path, Some(ADMIN), &["user", "revoke", ADMIN])
        .failure()
        .stderr(contains("cannot revoke their own privilege"));

    run_as(&db_path, None, &["user", "list"])
        .success()
        .stdout(contains("bia"))
        .stdout(contains("clinician"));
}

#[test]
fn test_change_password() {
    let db_path = setup_test_db("user_passwd");
    init_practice(&db_path);

    run_as(
        &db_path,
        None,
        &[
            "user",
            "passwd",
            ADMIN,
            "--current",
            "Errada@123",
            "--new",
            "Nova@2025x",
            "--confirm",
            "Nova@2025x",
        ],
    )
    .failure()
    .stderr(contains("Current password is incorrect"));

    run_as(
        &db_path,
        None,
        &[
            "user",
            "passwd",
            ADMIN,
            "--current",
            ADMIN_PASSWORD,
            "--new",
            "Nova@2025x",
            "--confirm",
            "Nova@2025y",
        ],
    )
    .failure()
    .stderr(contains("confirmation does not match"));

    run_as(
        &db_path,
        None,
        &[
            "user",
            "passwd",
            ADMIN,
            "--current",
            ADMIN_PASSWORD,
            "--new",
            "Nova@2025x",
            "--confirm",
            "Nova@2025x",
        ],
    )
    .success()
    .stdout(contains("Password of 'ana' changed"));
}

#[test]
fn test_rename_user_renames_clinician() {
    let db_path = setup_test_db("user_rename");
    init_practice(&db_path);

    run_as(&db_path, Some(ADMIN), &["user", "rename", ADMIN, "ana.lima"])
        .success()
        .stdout(contains("renamed to 'ana.lima'"));

    run_as(&db_path, None, &["user", "clinicians"])
        .success()
        .stdout(contains("ana.lima"));

    run_as(&db_path, Some("ana.lima"), &["client", "list"])
        .success()
        .stdout(contains("João Silva"));
}
