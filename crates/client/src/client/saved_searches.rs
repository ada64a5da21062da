//! Saved search listing.

use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::SavedSearchInfo;

impl SplunkClient {
    /// List saved searches sorted by name.
    ///
    /// `owner` is passed to Splunk as a filter. `name_filter` keeps entries whose
    /// name contains it, ignoring case. Empty strings mean no filter.
    pub async fn list_saved_searches(
        &self,
        name_filter: Option<&str>,
        owner: Option<&str>,
    ) -> Result<Vec<SavedSearchInfo>> {
        let session = self.session()?;
        let owner = owner.filter(|o| !o.is_empty());
        let needle = name_filter
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase);

        let mut searches = endpoints::list_saved_searches(session, owner).await?;
        if let Some(needle) = &needle {
            searches.retain(|s| s.name.to_lowercase().contains(needle.as_str()));
        }
        searches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(searches)
    }
}
