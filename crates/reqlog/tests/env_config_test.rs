//! Loading [`LoggerConfig`] from `REQLOG_*` environment variables.

use reqlog::{LoggerConfig, Severity, ENV_PREFIX};
use serial_test::serial;

fn clear_env() {
    for name in ["LEVEL", "INCLUDE_REQUEST_HEADERS", "STATUS_LEVELS"] {
        std::env::remove_var(format!("{}{}", ENV_PREFIX, name));
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    let config = LoggerConfig::from_env().unwrap();
    assert_eq!(config, LoggerConfig::default());
}

#[test]
#[serial]
fn test_from_env_reads_prefixed_vars() {
    clear_env();
    std::env::set_var("REQLOG_LEVEL", "Warning");
    std::env::set_var("REQLOG_INCLUDE_REQUEST_HEADERS", "true");
    std::env::set_var("REQLOG_STATUS_LEVELS", "true");

    let config = LoggerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.explicit_level(), Some(Severity::Warn));
    assert!(config.include_request_headers());
    assert!(config.status_levels());
}

#[test]
#[serial]
fn test_from_env_rejects_unknown_level() {
    clear_env();
    std::env::set_var("REQLOG_LEVEL", "loud");

    let result = LoggerConfig::from_env();
    clear_env();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("loud"), "unexpected error: {}", err);
}
