//! Index listing.

use glob::Pattern;
use tracing::debug;

use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::IndexInfo;

/// Compile a shell-style pattern. A pattern glob cannot parse is matched literally.
fn compile_pattern(raw: &str) -> Pattern {
    Pattern::new(raw).unwrap_or_else(|e| {
        debug!(pattern = raw, error = %e, "Invalid index pattern, matching literally");
        Pattern::new(&Pattern::escape(raw)).unwrap_or_default()
    })
}

impl SplunkClient {
    /// List indexes sorted by name, optionally filtered by a glob such as `main*`.
    ///
    /// An empty pattern means no filter.
    pub async fn list_indexes(&self, pattern: Option<&str>) -> Result<Vec<IndexInfo>> {
        let session = self.session()?;
        let matcher = pattern.filter(|p| !p.is_empty()).map(compile_pattern);

        let mut indexes = endpoints::list_indexes(session).await?;
        if let Some(matcher) = &matcher {
            indexes.retain(|index| matcher.matches(&index.name));
        }
        indexes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(indexes)
    }
}
