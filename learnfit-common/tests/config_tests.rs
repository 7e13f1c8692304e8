//! Tests for configuration loading and root folder resolution
//!
//! Tests that touch LEARNFIT_ROOT_FOLDER are marked #[serial] so environment
//! changes do not race between test threads.

use learnfit_common::config::{
    CompiledDefaults, RootFolderInitializer, RootFolderResolver, TomlConfig, ROOT_FOLDER_ENV,
};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

#[test]
fn test_compiled_defaults() {
    let defaults = CompiledDefaults::for_current_platform();

    assert!(!defaults.root_folder.as_os_str().is_empty());
    assert!(defaults.root_folder.ends_with("learnfit") || defaults.root_folder.ends_with("learnfit_data"));
    assert_eq!(defaults.port, 5740);
    assert_eq!(defaults.batch_concurrency, 4);
}

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let root_folder = RootFolderResolver::new("test-module").resolve();

    assert_eq!(root_folder, CompiledDefaults::for_current_platform().root_folder);
}

#[test]
#[serial]
fn test_resolver_env_var_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/learnfit-test-env-folder");

    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/learnfit-test-toml-folder")),
        ..Default::default()
    };
    let root_folder = RootFolderResolver::new("test-module").with_toml(&toml).resolve();

    env::remove_var(ROOT_FOLDER_ENV);
    assert_eq!(root_folder, PathBuf::from("/tmp/learnfit-test-env-folder"));
}

#[test]
#[serial]
fn test_resolver_cli_arg_beats_env() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/learnfit-test-env-folder");

    let root_folder = RootFolderResolver::new("test-module")
        .with_cli_arg(Some(PathBuf::from("/tmp/learnfit-test-cli-folder")))
        .resolve();

    env::remove_var(ROOT_FOLDER_ENV);
    assert_eq!(root_folder, PathBuf::from("/tmp/learnfit-test-cli-folder"));
}

#[test]
#[serial]
fn test_resolver_uses_toml_when_env_unset() {
    env::remove_var(ROOT_FOLDER_ENV);

    let toml = TomlConfig::from_toml_str(r#"root_folder = "/srv/learnfit""#).unwrap();
    let root_folder = RootFolderResolver::new("test-module").with_toml(&toml).resolve();

    assert_eq!(root_folder, PathBuf::from("/srv/learnfit"));
}

#[test]
fn test_toml_config_parses_all_fields() {
    let config = TomlConfig::from_toml_str(
        r#"
        root_folder = "/data/learnfit"
        port = 6001
        taxonomy_path = "/etc/learnfit/taxonomy.toml"
        batch_concurrency = 8
        "#,
    )
    .unwrap();

    assert_eq!(config.root_folder, Some(PathBuf::from("/data/learnfit")));
    assert_eq!(config.port, Some(6001));
    assert_eq!(config.taxonomy_path, Some(PathBuf::from("/etc/learnfit/taxonomy.toml")));
    assert_eq!(config.batch_concurrency, Some(8));
}

#[test]
fn test_toml_config_rejects_unknown_keys() {
    assert!(TomlConfig::from_toml_str("prot = 6001").is_err());
}

#[test]
fn test_missing_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.toml");

    let config = TomlConfig::load_or_default(Some(&missing)).unwrap();
    assert!(config.root_folder.is_none());
    assert!(config.port.is_none());
}

#[test]
fn test_malformed_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"").unwrap();

    assert!(TomlConfig::load_or_default(Some(&path)).is_err());
}

#[test]
fn test_initializer_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("a").join("b");

    let initializer = RootFolderInitializer::new(root.clone());
    initializer.ensure_directory_exists().unwrap();

    assert!(root.is_dir());
    assert_eq!(initializer.database_path(), root.join("learnfit.db"));
}
