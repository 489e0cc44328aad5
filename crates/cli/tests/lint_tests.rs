//! Integration tests for `vaultcfg lint`.
//!
//! Invariants:
//! - Each test lints its own temp directory.
//! - Failures exit with 1; warnings alone still succeed.

mod common;

use common::{vaultcfg_cmd, write_config};
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn valid_vault_section() -> serde_json::Value {
    json!({
        "vaultAddress": "https://vault.example.com:8200",
        "mountPoint": "team-a/kv",
        "approleAuthName": "approle",
        "roleIdPath": "{% user_home %}/vault/role_id.txt",
        "secretIdPath": "{% user_home %}/vault/secret_id.txt"
    })
}

#[test]
fn test_lint_clean_directory_succeeds() {
    let dir = TempDir::new().unwrap();
    write_config(
        dir.path(),
        "appsettings.json",
        &json!({
            "Vault": valid_vault_section(),
            "Db": "{% vault_secret mssql:password %}",
            "Clients": "{% vault_dict mssql/clients %}"
        }),
    );
    write_config(
        dir.path(),
        "appsettings.Production.json",
        &json!({"Vault": {"mountPoint": "prod"}}),
    );

    vaultcfg_cmd()
        .args(["lint", "--work-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Appsettings Linter ==="))
        .stdout(predicate::str::contains("Meets the placeholder syntax requirements."))
        .stdout(predicate::str::contains("[PASS]"))
        .stdout(predicate::str::contains("appsettings.Production.json"));
}

#[test]
fn test_lint_failures_exit_with_1() {
    let dir = TempDir::new().unwrap();
    write_config(
        dir.path(),
        "appsettings.json",
        &json!({
            "Vault": {"vaultAddress": "not a url", "mountPoint": "/secret"},
            "Db": "{% vault_secret mssql %}"
        }),
    );

    vaultcfg_cmd()
        .args(["lint", "--work-dir"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("is NOT a valid Vault address."))
        .stdout(predicate::str::contains("is NOT a valid Vault mountpoint."))
        .stdout(predicate::str::contains("[FAIL]"))
        .stderr(predicate::str::contains("Linting found 3 failure(s)"));
}

#[test]
fn test_lint_warnings_only_succeeds() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "appsettings.json", &json!({"Logging": {}}));
    write_config(
        dir.path(),
        "appsettings.Development.json",
        &json!({"Vault": {}, "Db": "{% vault_secret mssql:password %}"}),
    );

    vaultcfg_cmd()
        .args(["lint", "--work-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault Section"))
        .stdout(predicate::str::contains("base appsettings.json file!"))
        .stdout(predicate::str::contains("[WARN]"));
}

#[test]
fn test_lint_missing_directory() {
    vaultcfg_cmd()
        .args(["lint", "--work-dir", "/nonexistent/config-dir"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist!"));
}

#[test]
fn test_lint_missing_base_file() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "appsettings.Production.json", &json!({}));

    vaultcfg_cmd()
        .args(["lint", "--work-dir"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "The base file 'appsettings.json' wasn't found",
        ));
}
