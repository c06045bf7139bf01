use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::content::{MetaTag, MetadataRecord};

/// Everything the rendering layer needs to draw a post page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostPage {
    pub id: u64,
    pub slug: String,
    pub title: String,
    /// Post body with ad placeholders removed.
    pub content_html: String,
    pub metadata: MetadataRecord,
    pub meta_tags: Vec<MetaTag>,
}
