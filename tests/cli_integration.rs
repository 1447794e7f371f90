//! CLI integration tests.
//!
//! These tests verify the CLI argument parsing and configuration loading.

use std::ffi::OsString;
use std::io::Write;
use tempfile::NamedTempFile;

use proxy_commands::catalog::Catalog;
use proxy_commands::cli::{parse_args_from, Args};
use proxy_commands::config::Config;

fn args(args: &[&str]) -> Vec<OsString> {
    std::iter::once("proxy-commands")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

fn config_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

// ============================================================================
// CLI Argument Tests
// ============================================================================

#[test]
fn test_cli_defaults() {
    let result = parse_args_from(args(&[])).unwrap();

    assert!(result.host.is_none());
    assert!(result.port.is_none());
    assert!(result.config.is_none());
    assert!(result.log_level.is_none());
    assert!(!result.no_stdin);
}

#[test]
fn test_cli_full_options() {
    let result = parse_args_from(args(&[
        "-H",
        "0.0.0.0",
        "-p",
        "8080",
        "-c",
        "/etc/proxy-commands.json",
        "-l",
        "debug",
        "--no-stdin",
    ]))
    .unwrap();

    assert_eq!(result.host.unwrap().to_string(), "0.0.0.0");
    assert_eq!(result.port, Some(8080));
    assert_eq!(
        result.config.unwrap().to_str().unwrap(),
        "/etc/proxy-commands.json"
    );
    assert_eq!(result.log_level, Some("debug".to_string()));
    assert!(result.no_stdin);
}

#[test]
fn test_cli_invalid_values() {
    assert!(parse_args_from(args(&["-p", "not-a-number"])).is_err());
    assert!(parse_args_from(args(&["-H", "not-an-ip"])).is_err());
    assert!(parse_args_from(args(&["--api-key", "x"])).is_err());
}

// ============================================================================
// Configuration Loading Tests
// ============================================================================

#[test]
fn test_config_from_json_file() {
    let file = config_file(
        r#"{
        "console": {
            "host": "192.168.1.100",
            "port": 9000,
            "graceful_shutdown": false
        },
        "servers": [
            { "name": "lobby", "address": "10.0.0.1:30000", "groups": ["hub"] },
            { "name": "arena", "address": "10.0.0.2:30000", "groups": ["games"] },
            { "name": "creative", "address": "10.0.0.3:30000", "media_pool": "creative" }
        ],
        "server_groups": { "games": ["lobby"] },
        "permission_groups": {
            "default": ["cmd_help", "cmd_usage"],
            "admin": ["cmd_send", "cmd_kick"]
        },
        "user_groups": { "alice": "admin" },
        "logging": { "level": "debug" }
    }"#,
    );

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.console.host, "192.168.1.100");
    assert_eq!(config.console.port, 9000);
    assert!(!config.console.graceful_shutdown);
    assert_eq!(config.servers.len(), 3);
    assert_eq!(config.servers[2].media_pool, "creative");
    assert_eq!(config.logging.level, "debug");

    let catalog = Catalog::from_config(&config).unwrap();
    assert_eq!(
        catalog.group_members("games").unwrap(),
        &["arena".to_string(), "lobby".to_string()]
    );
    assert_eq!(catalog.user_group("alice"), "admin");
    assert_eq!(catalog.user_group("bob"), "default");
}

#[test]
fn test_config_priority_cli_over_file() {
    let file = config_file(r#"{ "console": { "host": "10.0.0.1", "port": 5000 } }"#);

    let args = Args {
        host: Some("192.168.1.1".parse().unwrap()),
        port: Some(8080),
        config: Some(file.path().to_path_buf()),
        ..Args::default()
    };

    let config = Config::load(&args).unwrap();

    assert_eq!(config.console.host, "192.168.1.1");
    assert_eq!(config.console.port, 8080);
}

#[test]
fn test_config_file_without_cli_overrides() {
    let file = config_file(r#"{ "console": { "port": 5000 } }"#);

    let args = Args {
        config: Some(file.path().to_path_buf()),
        ..Args::default()
    };

    let config = Config::load(&args).unwrap();
    assert_eq!(config.console.port, 5000);
}

#[test]
fn test_config_to_console_config() {
    let args = Args {
        host: Some("0.0.0.0".parse().unwrap()),
        port: Some(8080),
        ..Args::default()
    };

    let config = Config::load(&args).unwrap();
    let console = config.to_console_config().unwrap();

    assert_eq!(console.host, "0.0.0.0");
    assert_eq!(console.port, 8080);
    assert!(console.graceful_shutdown);
}

#[test]
fn test_config_rejects_name_collision() {
    let file = config_file(
        r#"{ "servers": [
            { "name": "lobby", "address": "10.0.0.1:30000", "groups": ["arena"] },
            { "name": "arena", "address": "10.0.0.2:30000" }
        ] }"#,
    );

    let config = Config::from_file(file.path()).unwrap();
    assert!(Catalog::from_config(&config).is_err());
}

#[test]
fn test_config_missing_file() {
    let args = Args {
        config: Some("/nonexistent/proxy-commands.json".into()),
        ..Args::default()
    };

    assert!(Config::load(&args).is_err());
}

// ============================================================================
// Configuration Serialization Tests
// ============================================================================

#[test]
fn test_config_partial_deserialization() {
    let json = r#"{"console": {"port": 9999}}"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.console.port, 9999);
    assert_eq!(config.console.host, "127.0.0.1");
    assert!(config.console.graceful_shutdown);
    assert!(config.servers.is_empty());
}
