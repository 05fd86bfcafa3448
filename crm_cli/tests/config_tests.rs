//! Tests for the layered configuration manager
//!
//! Defaults, the TOML file and `CRM_` environment variables are merged by
//! figment; these tests check each layer and the validation done by `set`.

use crm_cli::config::ConfigManager;
use crm_client_core::CloneProgram;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

fn create_test_config_manager(temp_dir: &TempDir) -> ConfigManager {
    ConfigManager::with_path(temp_dir.path().join("config.toml"))
}

#[test]
#[serial]
fn test_defaults_without_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let manager = create_test_config_manager(&temp_dir);

    let config = manager.load().unwrap();

    assert_eq!(config.api.base_url, "https://api.github.com");
    assert_eq!(config.api.page_size, 15);
    assert_eq!(config.clone.program, CloneProgram::Gh);
    assert_eq!(config.clone.starter_folder, ".main");
    assert!(config.output.progress_enabled);
}

#[test]
#[serial]
fn test_set_then_get() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = create_test_config_manager(&temp_dir);

    manager.set("clone.program", "git").unwrap();
    manager.set("clone.starter_folder", "starter").unwrap();
    manager.set("api.page_size", "50").unwrap();

    assert!(temp_dir.path().join("config.toml").exists());
    assert_eq!(manager.get("clone.program").unwrap(), "git");
    assert_eq!(manager.get("clone.starter_folder").unwrap(), "starter");
    assert_eq!(manager.get("api.page_size").unwrap(), "50");

    let config = manager.load().unwrap();
    assert_eq!(config.clone.program, CloneProgram::Git);
    assert_eq!(config.api.page_size, 50);
}

#[test]
#[serial]
fn test_list_contains_every_section() {
    let temp_dir = TempDir::new().unwrap();
    let manager = create_test_config_manager(&temp_dir);

    let items = manager.list().unwrap();
    let keys: Vec<&str> = items.iter().map(|(key, _)| key.as_str()).collect();

    assert!(keys.contains(&"api.page_size"));
    assert!(keys.contains(&"clone.program"));
    assert!(keys.contains(&"output.color_enabled"));
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn test_set_rejects_invalid_values() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = create_test_config_manager(&temp_dir);

    assert!(manager.set("clone.program", "svn").is_err());
    assert!(manager.set("api.page_size", "0").is_err());
    assert!(manager.set("api.page_size", "101").is_err());
    assert!(manager.set("api.page_size", "many").is_err());
    assert!(manager.set("api.base_url", "ftp://example.com").is_err());
    assert!(manager.set("api.timeout_seconds", "0").is_err());
    assert!(manager.set("clone.starter_folder", "a/b").is_err());
    assert!(manager.set("output.color_enabled", "yes").is_err());

    // Nothing valid was written
    assert!(!temp_dir.path().join("config.toml").exists());
}

#[test]
fn test_set_rejects_unknown_key() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = create_test_config_manager(&temp_dir);

    let error = manager.set("clone.depth", "1").unwrap_err();

    let message = error.to_string();
    assert!(message.contains("Unknown configuration key 'clone.depth'"));
    assert!(message.contains("clone.program"));
}

#[test]
#[serial]
fn test_get_unknown_key() {
    let temp_dir = TempDir::new().unwrap();
    let manager = create_test_config_manager(&temp_dir);

    assert!(manager.get("api.missing").is_err());
}

#[test]
#[serial]
fn test_file_values_are_loaded() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[clone]\nprogram = \"git\"\ngit_base_url = \"https://git.example.edu\"\n",
    )
    .unwrap();
    let manager = create_test_config_manager(&temp_dir);

    let config = manager.load().unwrap();

    assert_eq!(config.clone.program, CloneProgram::Git);
    assert_eq!(config.clone.git_base_url, "https://git.example.edu");
    // Unset fields in a present section keep their defaults
    assert_eq!(config.clone.starter_folder, ".main");
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = create_test_config_manager(&temp_dir);
    manager.set("api.page_size", "20").unwrap();

    // SAFETY: env mutation is serialized with #[serial]
    unsafe {
        std::env::set_var("CRM_API__PAGE_SIZE", "40");
        std::env::set_var("CRM_CLONE__PROGRAM", "git");
    }
    let config = manager.load();
    unsafe {
        std::env::remove_var("CRM_API__PAGE_SIZE");
        std::env::remove_var("CRM_CLONE__PROGRAM");
    }

    let config = config.unwrap();
    assert_eq!(config.api.page_size, 40);
    assert_eq!(config.clone.program, CloneProgram::Git);
}

#[test]
fn test_malformed_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("config.toml"), "[api\npage_size = ").unwrap();
    let manager = create_test_config_manager(&temp_dir);

    assert!(manager.load().is_err());
}

#[test]
#[serial]
fn test_zero_timeout_from_environment_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let manager = create_test_config_manager(&temp_dir);

    // SAFETY: env mutation is serialized with #[serial]
    unsafe {
        std::env::set_var("CRM_API__TIMEOUT_SECONDS", "0");
    }
    let result = manager.load();
    unsafe {
        std::env::remove_var("CRM_API__TIMEOUT_SECONDS");
    }

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("api.timeout_seconds"));
}

#[test]
#[serial]
fn test_out_of_range_values_in_file_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let manager = create_test_config_manager(&temp_dir);

    fs::write(temp_dir.path().join("config.toml"), "[api]\npage_size = 0\n").unwrap();
    assert!(manager.load().is_err());

    fs::write(
        temp_dir.path().join("config.toml"),
        "[clone]\nstarter_folder = \"../outside\"\n",
    )
    .unwrap();
    assert!(manager.load().is_err());
}
