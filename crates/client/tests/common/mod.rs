//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Clients built here talk plain HTTP to a local `MockServer`
//!
//! # What this does NOT handle
//! - Endpoint-specific mocks (mount those in each test)

use std::path::Path;
use std::time::Duration;

use splunk_client::SplunkClient;
use splunk_config::{Config, ConfigLoader};
use wiremock::matchers::{header, method, path};

#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let full_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// Loader pointed at `server` over plain HTTP, without credentials.
pub fn loader_for(server: &MockServer) -> ConfigLoader {
    ConfigLoader::new()
        .with_host(server.address().ip().to_string())
        .with_port(server.address().port())
        .with_scheme("http".to_string())
        .with_timeout(Duration::from_secs(5))
}

/// Token-authenticated config for `server`.
pub fn token_config(server: &MockServer) -> Config {
    loader_for(server)
        .with_token(TEST_TOKEN.to_string())
        .build()
        .expect("valid test config")
}

/// Mount the server-info mock used to verify `TEST_TOKEN` during `connect`.
pub async fn mount_token_verification(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/services/server/info"))
        .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("server/info.json")))
        .mount(server)
        .await;
}

/// A client that has completed token authentication against `server`.
pub async fn connected_client(server: &MockServer) -> SplunkClient {
    mount_token_verification(server).await;
    let mut client = SplunkClient::new(token_config(server));
    client.connect().await.expect("connect to mock server");
    client
}
