pub mod errors;
pub mod images;
pub mod metadata;
pub mod model;
pub mod sanitizer;

#[cfg(test)]
mod tests;

pub use errors::ContentError;
pub use images::{canonical_primary_image, extract_image_urls};
pub use metadata::assemble;
pub use model::{
    CategoryRef, ContentItem, MetaTag, MetadataRecord, RelatedBundle, RelatedItem,
    RelatedSection, SiteDefaults,
};
pub use sanitizer::ContentSanitizer;

use url::Url;

use crate::config::Config;

/// Content derived from a post before the related lookup runs.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedContent {
    pub cleaned_html: String,
    pub image_urls: Vec<Url>,
}

/// Strips ads and collects share images. Fails without touching anything
/// downstream when the HTML can't be cleaned.
pub fn prepare(
    item: &ContentItem,
    sanitizer: &ContentSanitizer,
    config: &Config,
) -> Result<PreparedContent, ContentError> {
    // 1. Remove ad placeholders
    let cleaned_html = sanitizer.clean(&item.raw_content_html)?;

    // 2. Resolve the share image and scan the raw content for uploads
    let primary = canonical_primary_image(item.featured_image_url.as_deref(), config.image_host());
    let image_urls = extract_image_urls(
        &item.raw_content_html,
        primary.as_ref().map(Url::as_str),
        config.uploads_base_url(),
    );

    Ok(PreparedContent {
        cleaned_html,
        image_urls,
    })
}

/// Final step once the related bundle is known.
pub fn build_metadata(
    item: &ContentItem,
    prepared: &PreparedContent,
    related: Option<RelatedBundle>,
    config: &Config,
) -> MetadataRecord {
    let site = SiteDefaults::from(config);
    assemble(
        item,
        &prepared.cleaned_html,
        &prepared.image_urls,
        related,
        &site,
    )
}
