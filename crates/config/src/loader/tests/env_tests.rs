//! Environment variable tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test `SPLUNK_*` variables feeding `build()`.
//! - Test environment precedence over earlier builder values.
//! - Test handling of empty, whitespace-only and malformed variables.

use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::types::{AuthStrategy, Scheme};
use secrecy::ExposeSecret;
use serial_test::serial;
use std::time::Duration;

use super::env_lock;

const ALL_VARS: [&str; 8] = [
    "SPLUNK_HOST",
    "SPLUNK_PORT",
    "SPLUNK_SCHEME",
    "SPLUNK_TOKEN",
    "SPLUNK_USERNAME",
    "SPLUNK_PASSWORD",
    "SPLUNK_VERIFY_SSL",
    "SPLUNK_TIMEOUT",
];

/// Runs `f` with every `SPLUNK_*` variable unset except the given overrides.
fn with_splunk_env<F: FnOnce()>(overrides: &[(&str, &str)], f: F) {
    let vars: Vec<(&str, Option<&str>)> = ALL_VARS
        .iter()
        .map(|name| {
            let value = overrides
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| *v);
            (*name, value)
        })
        .collect();
    temp_env::with_vars(vars, f);
}

#[test]
#[serial]
fn test_full_env_token_config() {
    let _lock = env_lock().lock().unwrap();

    with_splunk_env(
        &[
            ("SPLUNK_HOST", "splunk.example.com"),
            ("SPLUNK_PORT", "18089"),
            ("SPLUNK_SCHEME", "http"),
            ("SPLUNK_TOKEN", "env-token"),
            ("SPLUNK_VERIFY_SSL", "no"),
            ("SPLUNK_TIMEOUT", "45"),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();

            assert_eq!(config.connection.host, "splunk.example.com");
            assert_eq!(config.connection.port, 18089);
            assert_eq!(config.connection.scheme, Scheme::Http);
            assert!(!config.connection.verify_ssl);
            assert_eq!(config.connection.timeout, Duration::from_secs(45));
            match config.auth.strategy {
                AuthStrategy::ApiToken { token } => {
                    assert_eq!(token.expose_secret(), "env-token")
                }
                other => panic!("Expected ApiToken, got {:?}", other),
            }
        },
    );
}

#[test]
#[serial]
fn test_env_username_password() {
    let _lock = env_lock().lock().unwrap();

    with_splunk_env(
        &[
            ("SPLUNK_HOST", "localhost"),
            ("SPLUNK_USERNAME", "admin"),
            ("SPLUNK_PASSWORD", "changeme"),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(config.auth.strategy.kind(), "session");
            assert_eq!(config.connection.base_url(), "https://localhost:8089");
        },
    );
}

#[test]
#[serial]
fn test_env_overrides_builder_values() {
    let _lock = env_lock().lock().unwrap();

    with_splunk_env(
        &[("SPLUNK_HOST", "from-env"), ("SPLUNK_TOKEN", "t")],
        || {
            let config = ConfigLoader::new()
                .with_host("from-builder".to_string())
                .from_env()
                .unwrap()
                .build()
                .unwrap();
            assert_eq!(config.connection.host, "from-env");
        },
    );
}

#[test]
#[serial]
fn test_builder_values_after_env_win() {
    let _lock = env_lock().lock().unwrap();

    with_splunk_env(
        &[("SPLUNK_HOST", "from-env"), ("SPLUNK_TOKEN", "t")],
        || {
            let config = ConfigLoader::new()
                .from_env()
                .unwrap()
                .with_host("from-builder".to_string())
                .build()
                .unwrap();
            assert_eq!(config.connection.host, "from-builder");
        },
    );
}

#[test]
#[serial]
fn test_empty_env_vars_ignored() {
    let _lock = env_lock().lock().unwrap();

    with_splunk_env(
        &[
            ("SPLUNK_HOST", "localhost"),
            ("SPLUNK_TOKEN", ""),
            ("SPLUNK_USERNAME", "   "),
            ("SPLUNK_PASSWORD", ""),
        ],
        || {
            let result = ConfigLoader::new().from_env().unwrap().build();
            assert!(matches!(result, Err(ConfigError::MissingAuth)));
        },
    );
}

#[test]
#[serial]
fn test_whitespace_is_trimmed() {
    let _lock = env_lock().lock().unwrap();

    with_splunk_env(
        &[
            ("SPLUNK_HOST", "  padded.host  "),
            ("SPLUNK_PORT", " 8090 "),
            ("SPLUNK_TOKEN", " tok "),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(config.connection.host, "padded.host");
            assert_eq!(config.connection.port, 8090);
            match config.auth.strategy {
                AuthStrategy::ApiToken { token } => assert_eq!(token.expose_secret(), "tok"),
                other => panic!("Expected ApiToken, got {:?}", other),
            }
        },
    );
}

#[test]
#[serial]
fn test_non_numeric_port_rejected() {
    let _lock = env_lock().lock().unwrap();

    with_splunk_env(
        &[("SPLUNK_HOST", "localhost"), ("SPLUNK_PORT", "eighty")],
        || {
            let result = ConfigLoader::new().from_env();
            match result {
                Err(ConfigError::InvalidPort { value }) => assert_eq!(value, "eighty"),
                Err(e) => panic!("Expected InvalidPort, got {:?}", e),
                Ok(_) => panic!("Expected InvalidPort, got Ok"),
            }
        },
    );
}

#[test]
#[serial]
fn test_out_of_range_port_rejected() {
    let _lock = env_lock().lock().unwrap();

    with_splunk_env(
        &[
            ("SPLUNK_HOST", "localhost"),
            ("SPLUNK_PORT", "70000"),
            ("SPLUNK_TOKEN", "t"),
        ],
        || {
            let result = ConfigLoader::new().from_env().unwrap().build();
            assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
        },
    );
}

#[test]
#[serial]
fn test_invalid_scheme_from_env_rejected() {
    let _lock = env_lock().lock().unwrap();

    with_splunk_env(
        &[
            ("SPLUNK_HOST", "localhost"),
            ("SPLUNK_SCHEME", "gopher"),
            ("SPLUNK_TOKEN", "t"),
        ],
        || {
            let result = ConfigLoader::new().from_env().unwrap().build();
            assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        },
    );
}

#[test]
#[serial]
fn test_non_numeric_timeout_rejected() {
    let _lock = env_lock().lock().unwrap();

    with_splunk_env(
        &[("SPLUNK_HOST", "localhost"), ("SPLUNK_TIMEOUT", "soon")],
        || {
            let result = ConfigLoader::new().from_env();
            match result {
                Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "SPLUNK_TIMEOUT"),
                Err(e) => panic!("Expected InvalidValue, got {:?}", e),
                Ok(_) => panic!("Expected InvalidValue, got Ok"),
            }
        },
    );
}

#[test]
#[serial]
fn test_verify_ssl_values() {
    let _lock = env_lock().lock().unwrap();

    for (raw, expected) in [("YES", true), ("1", true), ("false", false), ("off", false)] {
        with_splunk_env(
            &[
                ("SPLUNK_HOST", "localhost"),
                ("SPLUNK_TOKEN", "t"),
                ("SPLUNK_VERIFY_SSL", raw),
            ],
            || {
                let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
                assert_eq!(config.connection.verify_ssl, expected, "value {raw:?}");
            },
        );
    }
}
