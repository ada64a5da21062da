//! Main Splunk REST API client and API methods.
//!
//! This module provides the primary [`SplunkClient`]: the Transport Session
//! that owns one authenticated HTTP connection context and the operations
//! built on top of it.
//!
//! # Submodules
//! - [`builder`]: HTTP client construction (timeout, TLS policy, User-Agent)
//! - `session`: Authenticated session state (private module)
//! - `search`: Search job lifecycle (submit, poll, fetch, teardown)
//! - `indexes`, `saved_searches`, `apps`, `server`: Listing operations
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Credential exchange (delegated to [`crate::auth`])
//!
//! # Invariants
//! - `connect` and `close` take `&mut self`; every operation takes `&self`. The
//!   borrow checker therefore rules out reconnecting while operations are in flight.
//! - Operations issued with no live session fail with [`ClientError::NotConnected`].
//! - Dropping the client releases the HTTP connection pool.

pub mod builder;
mod apps;
mod indexes;
mod saved_searches;
mod search;
mod server;
pub(crate) mod session;

pub use search::SearchRequest;

use reqwest::Method;
use serde_json::Value;
use splunk_config::Config;
use tracing::{debug, info};

use crate::auth;
use crate::endpoints::ApiRequest;
use crate::error::{ClientError, Result};
use session::Session;

/// Splunk REST API client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use splunk_client::SplunkClient;
/// use splunk_config::ConfigLoader;
///
/// let config = ConfigLoader::new().load_dotenv()?.from_env()?.build()?;
/// let mut client = SplunkClient::new(config);
/// client.connect().await?;
/// let indexes = client.list_indexes(Some("main*")).await?;
/// client.close();
/// ```
///
/// # Authentication
///
/// `connect` authenticates exactly once:
/// - `AuthStrategy::ApiToken`: bearer header, verified with one server-info call
/// - `AuthStrategy::SessionToken`: username/password exchanged for a session key
#[derive(Debug)]
pub struct SplunkClient {
    config: Config,
    session: Option<Session>,
}

impl SplunkClient {
    /// Create an unconnected client.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Base URL, e.g. `https://localhost:8089`.
    pub fn base_url(&self) -> String {
        self.config.connection.base_url()
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Build the HTTP client and authenticate.
    ///
    /// Any existing session is closed first, so calling this twice is safe.
    ///
    /// # Errors
    ///
    /// - [`ClientError::TokenAuthFailed`] if the token verification call is rejected.
    /// - [`ClientError::AuthFailed`] if login is rejected or returns no session key.
    /// - [`ClientError::Http`] if the server cannot be reached.
    pub async fn connect(&mut self) -> Result<()> {
        if self.session.is_some() {
            debug!("Closing existing Splunk session before reconnecting");
            self.close();
        }

        let base_url = self.config.connection.base_url();
        let http = builder::build_http_client(&self.config.connection)?;
        let authorization =
            auth::authenticate(&http, &base_url, &self.config.auth.strategy).await?;

        info!(
            base_url = %base_url,
            auth = self.config.auth.strategy.kind(),
            "Connected to Splunk"
        );
        self.session = Some(Session::new(http, base_url, authorization));
        Ok(())
    }

    /// Release the session. Safe to call any number of times.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            info!("Closed Splunk session");
        }
    }

    /// Issue one authenticated request and return the normalized body.
    ///
    /// `output_mode=json` is added unless `params` or `form` already carry an
    /// output mode.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        form: Option<&[(&str, &str)]>,
    ) -> Result<Value> {
        let session = self.session()?;

        let mut request = ApiRequest::new(method, path);
        for (key, value) in params {
            request = request.param(*key, *value);
        }
        request.form = form.map(|fields| {
            fields
                .iter()
                .map(|(k, v)| (*k, v.to_string()))
                .collect()
        });

        session.send(request).await
    }

    pub(crate) fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(ClientError::NotConnected)
    }
}
