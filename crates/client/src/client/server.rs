//! Server info.

use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::ServerInfo;

impl SplunkClient {
    /// Get server information. `None` when Splunk returns no entries.
    pub async fn get_server_info(&self) -> Result<Option<ServerInfo>> {
        endpoints::get_server_info(self.session()?).await
    }
}
