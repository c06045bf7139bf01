//! Wire types for the WordPress REST API (`/wp-json/wp/v2`).
//!
//! Only the fields the pipeline reads are modelled. Everything optional on
//! the WordPress side is optional here too, since plugins (Yoast in
//! particular) may or may not be installed.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::content::{CategoryRef, ContentItem, RelatedItem};

#[derive(Debug, Clone, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WpPost {
    pub id: u64,
    pub slug: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub date_gmt: Option<String>,
    #[serde(default)]
    pub modified_gmt: Option<String>,
    pub title: Rendered,
    #[serde(default)]
    pub content: Option<Rendered>,
    #[serde(default)]
    pub yoast_head_json: Option<YoastHead>,
    #[serde(default, rename = "_embedded")]
    pub embedded: Option<WpEmbedded>,
}

/// Summary returned by the related-posts query (`_fields=id,slug,title`).
#[derive(Debug, Clone, Deserialize)]
pub struct WpPostSummary {
    pub id: u64,
    pub slug: String,
    pub title: Rendered,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YoastHead {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub og_description: Option<String>,
    #[serde(default)]
    pub og_image: Vec<YoastImage>,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YoastImage {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WpEmbedded {
    #[serde(default)]
    pub author: Vec<WpAuthor>,
    #[serde(default, rename = "wp:featuredmedia")]
    pub featured_media: Vec<WpMedia>,
    #[serde(default, rename = "wp:term")]
    pub terms: Vec<Vec<WpTerm>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WpAuthor {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WpMedia {
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WpTerm {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub taxonomy: String,
}

impl From<WpPost> for ContentItem {
    fn from(post: WpPost) -> Self {
        let yoast = post.yoast_head_json.unwrap_or_default();
        let embedded = post.embedded.unwrap_or_default();

        let featured_image_url = yoast
            .og_image
            .first()
            .map(|image| image.url.clone())
            .or_else(|| {
                embedded
                    .featured_media
                    .first()
                    .and_then(|media| media.source_url.clone())
            });

        let categories = embedded
            .terms
            .iter()
            .flatten()
            .filter(|term| term.taxonomy == "category")
            .map(|term| CategoryRef::new(term.id, term.slug.clone(), term.name.clone()))
            .collect();

        let author = yoast
            .author
            .or_else(|| embedded.author.first().map(|a| a.name.clone()));

        Self {
            id: post.id,
            slug: post.slug,
            title: post.title.rendered,
            raw_content_html: post.content.map(|c| c.rendered).unwrap_or_default(),
            categories,
            featured_image_url,
            meta_title: yoast.title,
            description: yoast.description,
            og_description: yoast.og_description,
            author,
            published_at: post.date_gmt.as_deref().and_then(parse_gmt),
            modified_at: post.modified_gmt.as_deref().and_then(parse_gmt),
            link: post.link,
        }
    }
}

impl From<WpPostSummary> for RelatedItem {
    fn from(summary: WpPostSummary) -> Self {
        RelatedItem::new(summary.id, summary.slug, summary.title.rendered)
    }
}

/// WordPress reports `*_gmt` timestamps without an offset.
fn parse_gmt(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
