use assert_cmd::Command;
use crm_client_core::models::{ClassroomInfo, Organization};
use crm_client_core::{Classroom, ClassroomStore};
use predicates::prelude::*;
use tempfile::TempDir;

/// `crm` with an isolated config directory
fn crm(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("crm").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("CRM_API__PAGE_SIZE")
        .env_remove("CRM_CLONE__PROGRAM");
    cmd
}

fn bound_classroom() -> TempDir {
    let temp = TempDir::new().unwrap();
    let classroom = Classroom::new(
        Organization {
            id: 1,
            login: "classroom-org".to_string(),
        },
        ClassroomInfo {
            id: 10,
            name: "Intro to Programming".to_string(),
        },
    );
    ClassroomStore::save(temp.path(), &classroom).unwrap();
    temp
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("crm").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("crm").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("clone"))
        .stdout(predicate::str::contains("student"));
}

#[test]
fn test_clone_outside_classroom_is_not_initialized() {
    let config_home = TempDir::new().unwrap();
    let workdir = TempDir::new().unwrap();

    crm(&config_home)
        .current_dir(workdir.path())
        .arg("clone")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("No classroom or assignment found"));
}

#[test]
fn test_init_below_classroom_is_misuse() {
    let config_home = TempDir::new().unwrap();
    let classroom = bound_classroom();
    let nested = classroom.path().join("lab-1");
    std::fs::create_dir_all(&nested).unwrap();

    crm(&config_home)
        .current_dir(&nested)
        .args(["init", "--classroom", "10"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("crm init"));
}

#[test]
fn test_student_add_and_list() {
    let config_home = TempDir::new().unwrap();
    let classroom = bound_classroom();

    crm(&config_home)
        .current_dir(classroom.path())
        .args(["student", "add", "Ada Lovelace", "ada@example.edu", "ada"])
        .assert()
        .success();

    crm(&config_home)
        .current_dir(classroom.path())
        .args(["student", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ada"))
        .stdout(predicate::str::contains("Ada Lovelace"))
        .stdout(predicate::str::contains("<ada@example.edu>"));

    let saved = ClassroomStore::load(classroom.path()).unwrap();
    assert_eq!(saved.students.len(), 1);
}

#[test]
fn test_student_remove_unknown_login_fails() {
    let config_home = TempDir::new().unwrap();
    let classroom = bound_classroom();

    crm(&config_home)
        .current_dir(classroom.path())
        .args(["student", "remove", "nobody"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nobody"));
}

#[test]
fn test_student_outside_classroom_is_not_initialized() {
    let config_home = TempDir::new().unwrap();
    let workdir = TempDir::new().unwrap();

    crm(&config_home)
        .current_dir(workdir.path())
        .args(["student", "list"])
        .assert()
        .code(5);
}

#[test]
fn test_config_set_and_get() {
    let config_home = TempDir::new().unwrap();

    crm(&config_home)
        .args(["config", "set", "clone.program", "git"])
        .assert()
        .success();

    crm(&config_home)
        .args(["config", "get", "clone.program"])
        .assert()
        .success()
        .stdout(predicate::str::diff("git\n"));

    assert!(
        config_home
            .path()
            .join("crm")
            .join("config.toml")
            .exists()
    );
}

#[test]
fn test_config_set_invalid_value_fails() {
    let config_home = TempDir::new().unwrap();

    crm(&config_home)
        .args(["config", "set", "api.page_size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page_size"));
}

#[test]
fn test_config_list() {
    let config_home = TempDir::new().unwrap();

    crm(&config_home)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page_size"))
        .stdout(predicate::str::contains("starter_folder"));
}

#[test]
fn test_completions() {
    let mut cmd = Command::cargo_bin("crm").unwrap();
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("crm"));
}
