#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ADMIN: &str = "ana";
pub const ADMIN_PASSWORD: &str = "Senha@123";

pub fn rcl() -> Command {
    cargo_bin_cmd!("rclinic")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rclinic.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rclinic_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `rclinic --db <db> [--user ana] <args…>`
pub fn run_as(db_path: &str, user: Option<&str>, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = rcl();
    cmd.args(["--db", db_path]);
    if let Some(u) = user {
        cmd.args(["--user", u]);
    }
    cmd.args(args).assert()
}

pub fn init_db(db_path: &str) {
    rcl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Fresh DB with the admin clinician `ana` (clinician id 1) and one client
/// `João Silva` priced at 100.
pub fn init_practice(db_path: &str) {
    init_db(db_path);

    run_as(
        db_path,
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
    .success();

    run_as(
        db_path,
        Some(ADMIN),
        &["client", "add", "João Silva", "--price", "100", "--day", "monday"],
    )
    .success();
}

/// Four sessions of `João Silva` in March 2025:
/// realized+paid, realized unpaid, missed chargeable, missed not chargeable.
pub fn add_reconciliation_sessions(db_path: &str) {
    let sessions: [&[&str]; 4] = [
        &["session", "add", "João Silva", "2025-03-03", "09:00", "--paid"],
        &["session", "add", "João Silva", "2025-03-10", "09:00"],
        &[
            "session",
            "add",
            "João Silva",
            "2025-03-17",
            "09:00",
            "--status",
            "missed",
            "--chargeable",
            "--amount",
            "50",
        ],
        &[
            "session",
            "add",
            "João Silva",
            "2025-03-24",
            "09:00",
            "--status",
            "missed",
            "--amount",
            "50",
        ],
    ];

    for args in sessions {
        run_as(db_path, Some(ADMIN), args).success();
    }
}
