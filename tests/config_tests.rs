//! Configuration loading tests

use shiftboard::config::load_config_from_path;
use shiftboard::error::Error;
use std::fs;
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("shiftboard.toml");
    fs::write(&path, content).expect("Failed to write config");
    (dir, path)
}

#[test]
fn test_load_full_config() {
    let (_dir, path) = write_config(
        r#"
[server]
host = "127.0.0.1"
port = 9090

[auth]
jwt_secret = "file-secret"
token_max_age_hours = 12

[database]
url = "postgres://localhost/shiftboard"
"#,
    );

    let config = load_config_from_path(&path).expect("Failed to load config");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.auth.jwt_secret, "file-secret");
    assert_eq!(config.auth.token_max_age_hours, 12);
    assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/shiftboard"));
}

#[test]
fn test_secret_from_environment() {
    std::env::set_var("SHIFTBOARD_CONFIG_TEST_SECRET", "from-env");
    let (_dir, path) = write_config("[auth]\njwt_secret = \"${SHIFTBOARD_CONFIG_TEST_SECRET}\"\n");

    let config = load_config_from_path(&path).expect("Failed to load config");
    assert_eq!(config.auth.jwt_secret, "from-env");
    std::env::remove_var("SHIFTBOARD_CONFIG_TEST_SECRET");
}

#[test]
fn test_unset_secret_is_rejected() {
    let (_dir, path) = write_config("[auth]\njwt_secret = \"${SHIFTBOARD_UNSET_SECRET_VAR}\"\n");

    let err = load_config_from_path(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {:?}", err);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_config_from_path(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound));
    assert!(err.to_string().contains("shiftboard init"));
}

#[test]
fn test_invalid_toml() {
    let (_dir, path) = write_config("this is [ not valid toml");
    let err = load_config_from_path(&path).unwrap_err();
    assert!(matches!(err, Error::TomlParse(_)));
}

#[test]
fn test_wrong_typed_value() {
    let (_dir, path) = write_config("[auth]\njwt_secret = \"s\"\ntoken_max_age_hours = \"soon\"\n");
    assert!(load_config_from_path(&path).is_err());
}

#[test]
fn test_oversized_token_age_is_rejected() {
    let (_dir, path) = write_config("[auth]\njwt_secret = \"s\"\ntoken_max_age_hours = 3000000000\n");
    let err = load_config_from_path(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {:?}", err);
    assert!(err.to_string().contains("token_max_age_hours"));
}
