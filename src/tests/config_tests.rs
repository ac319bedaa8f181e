use std::fs;
use std::io::Write;

use crate::config::{self, AppConfig, LogEnv};

fn write_temp_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_config() {
    let config = AppConfig::default();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8082);
    assert_eq!(config.server.request_timeout_secs, 4);
    assert_eq!(config.database.url, "sqlite://data/songbook.db");
    assert_eq!(config.database.max_connections, 8);
    assert_eq!(config.logging.env, LogEnv::Local);
    assert!(config.logging.dir.is_none());
    assert!(config::validate(&config).is_ok());
}

#[test]
fn test_custom_file_overrides_defaults() {
    let file = write_temp_config(
        r#"
[server]
port = 9090

[logging]
env = "prod"
dir = "logs"
"#,
    );
    let config = config::load_with(file.path().to_str()).unwrap();

    assert_eq!(config.server.port, 9090);
    // Untouched keys keep their defaults
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.logging.env, LogEnv::Prod);
    assert_eq!(config.logging.dir.as_deref(), Some("logs"));
}

#[test]
fn test_unknown_log_env_is_rejected() {
    let file = write_temp_config("[logging]\nenv = \"staging\"\n");
    assert!(config::load_with(file.path().to_str()).is_err());
}

#[test]
fn test_invalid_server_port() {
    let mut config = AppConfig::default();
    config.server.port = 0;
    let err = config::validate(&config).unwrap_err();
    assert!(err.to_string().contains("invalid server.port"));
}

#[test]
fn test_invalid_database_settings() {
    let mut config = AppConfig::default();
    config.database.max_connections = 0;
    assert!(config::validate(&config).is_err());

    let mut config = AppConfig::default();
    config.database.url = "  ".to_string();
    assert!(config::validate(&config).is_err());
}

#[test]
fn test_invalid_timeouts_and_limits() {
    let mut config = AppConfig::default();
    config.server.request_timeout_secs = 0;
    assert!(config::validate(&config).is_err());

    let mut config = AppConfig::default();
    config.server.max_body_bytes = 10;
    assert!(config::validate(&config).is_err());
}

#[test]
fn test_ensure_sqlite_parent_dir() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("songs.db");
    let url = format!("sqlite://{}", db_path.display());

    config::ensure_sqlite_parent_dir(&url).unwrap();
    assert!(fs::metadata(dir.path().join("nested")).unwrap().is_dir());

    // Non-file URLs are left alone
    config::ensure_sqlite_parent_dir("sqlite::memory:").unwrap();
}
