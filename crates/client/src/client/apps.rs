//! Installed app listing.

use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::AppInfo;

impl SplunkClient {
    /// List installed apps sorted by name.
    ///
    /// With `visible_only`, apps whose content says `visible: false` are dropped.
    pub async fn list_apps(&self, visible_only: bool) -> Result<Vec<AppInfo>> {
        let session = self.session()?;

        let mut apps = endpoints::list_apps(session).await?;
        if visible_only {
            apps.retain(|app| app.visible);
        }
        apps.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(apps)
    }
}
