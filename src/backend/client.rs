use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::backend::{
    errors::FetchError,
    source::ContentSource,
    types::{WpPost, WpPostSummary},
};
use crate::content::{CategoryRef, ContentItem, RelatedBundle, RelatedItem};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = concat!("pressgate/", env!("CARGO_PKG_VERSION"));
const POSTS_ENDPOINT: &str = "wp-json/wp/v2/posts";
const INDEX_ENDPOINT: &str = "wp-json/";

/// `ContentSource` backed by the WordPress REST API.
#[derive(Clone)]
pub struct WordPressClient {
    http: Client,
    base_url: Url,
    related_count: u8,
}

impl WordPressClient {
    pub fn new(base_url: Url, related_count: u8) -> Result<Self, FetchError> {
        let http = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(FetchError::from_reqwest_error)?;

        Ok(Self {
            http,
            base_url,
            related_count,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = self.base_url.join(endpoint)?;

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        // Check content length before downloading
        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status,
                retriable: status.is_server_error(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("application/json")
            .to_string();
        if !content_type.contains("json") {
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        // Check body size after download (in case Content-Length was missing)
        if body.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(body.len() as u64));
        }

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ContentSource for WordPressClient {
    #[instrument(skip(self), fields(base = %self.base_url))]
    async fn post_by_slug(&self, slug: &str) -> Result<Option<ContentItem>, FetchError> {
        let posts: Vec<WpPost> = self
            .get_json(
                POSTS_ENDPOINT,
                &[("slug", slug.to_string()), ("_embed", "1".to_string())],
            )
            .await?;

        debug!(matches = posts.len(), "Post lookup finished");
        Ok(posts.into_iter().next().map(ContentItem::from))
    }

    #[instrument(skip(self, categories), fields(categories = categories.len()))]
    async fn related(
        &self,
        categories: &[CategoryRef],
        post_id: u64,
    ) -> Result<Option<RelatedBundle>, FetchError> {
        let Some(category) = categories.first() else {
            return Ok(None);
        };
        if self.related_count == 0 {
            return Ok(None);
        }

        let posts: Vec<WpPostSummary> = self
            .get_json(
                POSTS_ENDPOINT,
                &[
                    ("categories", category.id.to_string()),
                    ("exclude", post_id.to_string()),
                    ("per_page", self.related_count.to_string()),
                    ("_fields", "id,slug,title".to_string()),
                ],
            )
            .await?;

        let items: Vec<RelatedItem> = posts
            .into_iter()
            .filter(|post| post.id != post_id)
            .map(RelatedItem::from)
            .collect();
        if items.is_empty() {
            return Ok(None);
        }

        Ok(Some(RelatedBundle {
            category: Some(category.clone()),
            items,
        }))
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> Result<(), FetchError> {
        let _: serde_json::Value = self.get_json(INDEX_ENDPOINT, &[]).await?;
        Ok(())
    }
}
