//! Shared helpers for MCP integration tests.
//!
//! # What this does NOT handle
//! - Endpoint-specific mocks (mount those in each test)

use std::time::Duration;

use serde_json::{Value, json};
use splunk_client::SplunkClient;
use splunk_config::ConfigLoader;
use wiremock::matchers::{method, path};

#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn server_info_body() -> Value {
    json!({
        "entry": [{
            "name": "server-info",
            "content": {
                "version": "9.2.1",
                "build": "78803f08aabb",
                "serverName": "splunk-test",
                "host": "splunk-test.local",
                "product_type": "enterprise",
                "license_state": "OK",
                "mode": "normal",
                "startup_time": "1760600000"
            }
        }]
    })
}

/// A token-authenticated client connected to `server`.
pub async fn connected_client(server: &MockServer) -> SplunkClient {
    Mock::given(method("GET"))
        .and(path("/services/server/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_info_body()))
        .mount(server)
        .await;

    let config = ConfigLoader::new()
        .with_host(server.address().ip().to_string())
        .with_port(server.address().port())
        .with_scheme("http".to_string())
        .with_token("test-token".to_string())
        .with_timeout(Duration::from_secs(5))
        .build()
        .expect("valid test config");
    let mut client = SplunkClient::new(config);
    client.connect().await.expect("connect to mock server");
    client
}

/// Parse the envelope carried in a `tools/call` result.
pub fn envelope(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"]
        .as_str()
        .expect("text content");
    serde_json::from_str(text).expect("envelope JSON")
}
