use async_trait::async_trait;

use crate::backend::errors::FetchError;
use crate::content::{CategoryRef, ContentItem, RelatedBundle};

/// Where posts come from. The page handlers only see this trait, so tests can
/// swap the WordPress client for a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Looks a published post up by slug. `Ok(None)` when there is no such post.
    async fn post_by_slug(&self, slug: &str) -> Result<Option<ContentItem>, FetchError>;

    /// Sibling posts sharing a category with `post_id`. `Ok(None)` when
    /// nothing related exists.
    async fn related(
        &self,
        categories: &[CategoryRef],
        post_id: u64,
    ) -> Result<Option<RelatedBundle>, FetchError>;

    /// Cheap reachability probe used by the health check.
    async fn ping(&self) -> Result<(), FetchError>;
}
