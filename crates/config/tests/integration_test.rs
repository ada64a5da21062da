//! Integration tests for configuration loading through the public API.
//!
//! These tests drive the full `ConfigLoader` chain (dotenv file, environment,
//! builder, validation) the way the server binary does at startup.

use serial_test::serial;
use splunk_config::{AuthStrategy, ConfigError, ConfigLoader, Scheme};
use std::io::Write;
use std::time::Duration;

const SPLUNK_VARS: [&str; 9] = [
    "SPLUNK_HOST",
    "SPLUNK_PORT",
    "SPLUNK_SCHEME",
    "SPLUNK_TOKEN",
    "SPLUNK_USERNAME",
    "SPLUNK_PASSWORD",
    "SPLUNK_VERIFY_SSL",
    "SPLUNK_TIMEOUT",
    "DOTENV_DISABLED",
];

/// Run `f` with every Splunk variable unset, restoring them afterwards
/// (including any a dotenv file set in between).
fn with_clean_env<F: FnOnce()>(f: F) {
    let vars: Vec<(&str, Option<&str>)> = SPLUNK_VARS.iter().map(|v| (*v, None)).collect();
    temp_env::with_vars(vars, f);
}

#[test]
#[serial]
fn test_env_file_drives_full_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "SPLUNK_HOST=splunk.internal").unwrap();
    writeln!(file, "SPLUNK_PORT=9089").unwrap();
    writeln!(file, "SPLUNK_SCHEME=http").unwrap();
    writeln!(file, "SPLUNK_USERNAME=admin").unwrap();
    writeln!(file, "SPLUNK_PASSWORD=changeme").unwrap();
    writeln!(file, "SPLUNK_VERIFY_SSL=no").unwrap();
    writeln!(file, "SPLUNK_TIMEOUT=45").unwrap();
    file.flush().unwrap();

    with_clean_env(|| {
        let config = ConfigLoader::new()
            .with_env_file(file.path().to_path_buf())
            .load_dotenv()
            .unwrap()
            .from_env()
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.connection.base_url(), "http://splunk.internal:9089");
        assert_eq!(config.connection.scheme, Scheme::Http);
        assert!(!config.connection.verify_ssl);
        assert_eq!(config.connection.timeout, Duration::from_secs(45));
        assert!(matches!(
            config.auth.strategy,
            AuthStrategy::SessionToken { ref username, .. } if username == "admin"
        ));
    });
}

#[test]
#[serial]
fn test_environment_overrides_builder_values() {
    temp_env::with_vars(
        [
            ("SPLUNK_HOST", Some("env-host")),
            ("SPLUNK_TOKEN", Some("env-token")),
            ("SPLUNK_PORT", None),
            ("SPLUNK_SCHEME", None),
            ("SPLUNK_USERNAME", None),
            ("SPLUNK_PASSWORD", None),
            ("SPLUNK_VERIFY_SSL", None),
            ("SPLUNK_TIMEOUT", None),
        ],
        || {
            let config = ConfigLoader::new()
                .with_host("builder-host".to_string())
                .with_port(8000)
                .from_env()
                .unwrap()
                .build()
                .unwrap();

            assert_eq!(config.connection.host, "env-host");
            assert_eq!(config.connection.port, 8000);
            assert!(matches!(config.auth.strategy, AuthStrategy::ApiToken { .. }));
        },
    );
}

#[test]
#[serial]
fn test_missing_credentials_rejected_end_to_end() {
    with_clean_env(|| {
        let err = ConfigLoader::new()
            .from_env()
            .unwrap()
            .with_host("splunk.internal".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingAuth));
    });
}

#[test]
#[serial]
fn test_missing_explicit_env_file_is_an_error() {
    with_clean_env(|| {
        let result = ConfigLoader::new()
            .with_env_file("/nonexistent/splunk-mcp.env".into())
            .load_dotenv();
        assert!(matches!(result, Err(ConfigError::DotenvIo { .. })));
    });
}
