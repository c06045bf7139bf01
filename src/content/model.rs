use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::config::Config;

/// One published post as delivered by the backend. Treated as an immutable
/// snapshot: the pipeline derives new values from it and never edits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub raw_content_html: String,
    pub categories: Vec<CategoryRef>,
    /// As reported by the backend; may not be a valid URL.
    pub featured_image_url: Option<String>,
    /// Title set through the SEO plugin, if any.
    pub meta_title: Option<String>,
    pub description: Option<String>,
    pub og_description: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    /// Backend permalink, used for `og:url` when no public URL can be built.
    pub link: Option<String>,
}

impl ContentItem {
    /// A bare item; the optional SEO fields start empty.
    pub fn new(
        id: u64,
        slug: impl Into<String>,
        title: impl Into<String>,
        raw_content_html: impl Into<String>,
    ) -> Self {
        Self {
            id,
            slug: slug.into(),
            title: title.into(),
            raw_content_html: raw_content_html.into(),
            categories: Vec::new(),
            featured_image_url: None,
            meta_title: None,
            description: None,
            og_description: None,
            author: None,
            published_at: None,
            modified_at: None,
            link: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryRef {
    pub id: u64,
    pub slug: String,
    pub name: String,
    pub path: String,
}

impl CategoryRef {
    pub fn new(id: u64, slug: impl Into<String>, name: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            id,
            path: category_path(&slug),
            slug,
            name: name.into(),
        }
    }
}

/// Summary of a sibling post, enough to render a link to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RelatedItem {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub path: String,
}

impl RelatedItem {
    pub fn new(id: u64, slug: impl Into<String>, title: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            id,
            path: post_path(&slug),
            slug,
            title: title.into(),
        }
    }
}

/// What the related-content lookup hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedBundle {
    pub category: Option<CategoryRef>,
    pub items: Vec<RelatedItem>,
}

/// Related block as the rendering layer shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RelatedSection {
    pub label: String,
    pub link: Option<String>,
    pub items: Vec<RelatedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OpenGraphImage {
    pub url: String,
    pub secure_url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub og_type: String,
    pub title: String,
    pub description: String,
    pub url: Option<String>,
    pub site_name: String,
    pub image: Option<OpenGraphImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MetaTag {
    pub property: String,
    pub content: String,
}

/// Normalized page metadata handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetadataRecord {
    pub title: String,
    pub description: String,
    #[schema(value_type = Vec<String>)]
    pub images: Vec<Url>,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    #[schema(value_type = Object)]
    pub structured_data: serde_json::Value,
    pub related: Option<RelatedSection>,
}

impl MetadataRecord {
    /// Open Graph and Twitter fields flattened into `<meta>` tag order.
    pub fn meta_tags(&self) -> Vec<MetaTag> {
        let og = &self.open_graph;
        let mut tags = vec![
            tag("og:type", &og.og_type),
            tag("og:title", &og.title),
            tag("og:description", &og.description),
        ];
        if let Some(url) = &og.url {
            tags.push(tag("og:url", url));
        }
        tags.push(tag("og:site_name", &og.site_name));
        if let Some(image) = &og.image {
            tags.push(tag("og:image", &image.url));
            tags.push(tag("og:image:secure_url", &image.secure_url));
            tags.push(tag("og:image:width", &image.width.to_string()));
            tags.push(tag("og:image:height", &image.height.to_string()));
            tags.push(tag("og:image:alt", &image.alt));
        }

        let twitter = &self.twitter;
        tags.push(tag("twitter:card", &twitter.card));
        tags.push(tag("twitter:title", &twitter.title));
        tags.push(tag("twitter:description", &twitter.description));
        if let Some(image) = &twitter.image {
            tags.push(tag("twitter:image", image));
        }
        tags
    }
}

fn tag(property: &str, content: &str) -> MetaTag {
    MetaTag {
        property: property.to_string(),
        content: content.to_string(),
    }
}

/// Site-wide values the assembler falls back on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDefaults {
    pub site_name: String,
    /// Public base URL pages are served under.
    pub site_url: Url,
    pub default_image_width: u32,
    pub default_image_height: u32,
    pub title_override_enabled: bool,
}

impl From<&Config> for SiteDefaults {
    fn from(config: &Config) -> Self {
        Self {
            site_name: config.site_name().to_string(),
            site_url: config.external_host().clone(),
            default_image_width: config.default_image_width(),
            default_image_height: config.default_image_height(),
            title_override_enabled: config.title_override_enabled(),
        }
    }
}

pub fn post_path(slug: &str) -> String {
    format!("/posts/{slug}")
}

pub fn category_path(slug: &str) -> String {
    format!("/category/{slug}")
}
