use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

/// A media asset path under the WordPress uploads directory, e.g.
/// `wp-content/uploads/2023/01/photo-1024x768.jpg`.
static UPLOAD_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"wp-content/uploads/[\w\-./]*\.\w+").unwrap());

/// Collects the upload assets referenced in `raw_content` as absolute URLs
/// under `uploads_base_url`, deduplicated in first-seen order. A parseable
/// `primary_image_url` always ends up at index 0, exactly once.
pub fn extract_image_urls(
    raw_content: &str,
    primary_image_url: Option<&str>,
    uploads_base_url: &Url,
) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut urls: Vec<Url> = UPLOAD_PATH_REGEX
        .find_iter(raw_content)
        .map(|m| m.as_str())
        .filter(|path| seen.insert(*path))
        .filter_map(|path| uploads_base_url.join(path).ok())
        .collect();

    if let Some(primary) = primary_image_url.and_then(|raw| Url::parse(raw.trim()).ok()) {
        urls.retain(|url| url != &primary);
        urls.insert(0, primary);
    }

    urls
}

/// The featured image as it should be shared. With an image host configured
/// the path is kept and moved onto that host; unparseable input yields `None`.
pub fn canonical_primary_image(featured_image_url: Option<&str>, image_host: Option<&Url>) -> Option<Url> {
    let featured = Url::parse(featured_image_url?.trim()).ok()?;
    let Some(host) = image_host else {
        return Some(featured);
    };

    let mut rebased = host.clone();
    rebased.set_path(featured.path());
    Some(rebased)
}
