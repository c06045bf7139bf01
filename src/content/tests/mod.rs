use std::fs;
use url::Url;

use crate::config::Config;
use crate::content::{
    CategoryRef, ContentItem, ContentSanitizer, RelatedBundle, RelatedItem, build_metadata,
    prepare,
};

fn test_config() -> Config {
    Config::new("127.0.0.1:0", Url::parse("https://cms.example.com/").unwrap())
        .with_external_host(Url::parse("https://www.example.com/").unwrap())
        .with_site_name("Harbour Times")
}

fn fixture_item() -> ContentItem {
    let html = fs::read_to_string("src/content/tests/fixtures/post.html")
        .expect("Failed to read test fixture");

    let mut item = ContentItem::new(101, "harbour-morning", "Harbour Morning", html);
    item.featured_image_url =
        Some("https://cms.example.com/wp-content/uploads/2023/02/nets.png".to_string());
    item.categories = vec![CategoryRef::new(4, "local", "Local")];
    item
}

#[test]
fn test_prepare_fixture_post() {
    let item = fixture_item();
    let sanitizer = ContentSanitizer::new("quads-ad").unwrap();
    let prepared = prepare(&item, &sanitizer, &test_config()).unwrap();

    assert!(!prepared.cleaned_html.contains("quads-ad"));
    assert!(!prepared.cleaned_html.contains("adsbygoogle"));
    assert!(prepared.cleaned_html.contains("gulls circled overhead"));
    assert!(prepared.cleaned_html.contains(r#"<p id="closing">"#));
    assert!(prepared.cleaned_html.contains("harbour-1024x683.jpg"));

    let urls: Vec<&str> = prepared.image_urls.iter().map(Url::as_str).collect();
    assert_eq!(
        urls,
        vec![
            "https://cms.example.com/wp-content/uploads/2023/02/nets.png",
            "https://cms.example.com/wp-content/uploads/2023/01/harbour-1024x683.jpg",
            "https://cms.example.com/wp-content/uploads/2023/01/harbour-300x200.jpg",
        ]
    );
}

#[test]
fn test_prepare_resolves_uploads_against_public_host() {
    let item = fixture_item();
    let sanitizer = ContentSanitizer::new("quads-ad").unwrap();
    let config =
        test_config().with_uploads_base_url(Url::parse("https://media.example.com/").unwrap());
    let prepared = prepare(&item, &sanitizer, &config).unwrap();

    let urls: Vec<&str> = prepared.image_urls.iter().map(Url::as_str).collect();
    assert_eq!(
        urls,
        vec![
            "https://cms.example.com/wp-content/uploads/2023/02/nets.png",
            "https://media.example.com/wp-content/uploads/2023/01/harbour-1024x683.jpg",
            "https://media.example.com/wp-content/uploads/2023/01/harbour-300x200.jpg",
            "https://media.example.com/wp-content/uploads/2023/02/nets.png",
        ]
    );
}

#[test]
fn test_prepare_rebases_primary_image() {
    let item = fixture_item();
    let sanitizer = ContentSanitizer::new("quads-ad").unwrap();
    let config = test_config().with_image_host(Url::parse("https://img.example.com/").unwrap());
    let prepared = prepare(&item, &sanitizer, &config).unwrap();

    assert_eq!(
        prepared.image_urls[0].as_str(),
        "https://img.example.com/wp-content/uploads/2023/02/nets.png"
    );
    // The scanned copy lives on the uploads host and is kept.
    assert!(
        prepared
            .image_urls
            .iter()
            .any(|u| u.as_str() == "https://cms.example.com/wp-content/uploads/2023/02/nets.png")
    );
}

#[test]
fn test_prepare_leaves_item_untouched() {
    let item = fixture_item();
    let before = item.clone();
    let sanitizer = ContentSanitizer::new("quads-ad").unwrap();
    let _ = prepare(&item, &sanitizer, &test_config()).unwrap();

    assert_eq!(item, before);
}

#[test]
fn test_prepare_propagates_sanitizer_errors() {
    let item = ContentItem::new(1, "broken", "Broken", "<p>\0</p>");
    let sanitizer = ContentSanitizer::new("quads-ad").unwrap();

    assert!(prepare(&item, &sanitizer, &test_config()).is_err());
}

#[test]
fn test_full_pipeline_metadata() {
    let item = fixture_item();
    let config = test_config();
    let sanitizer = ContentSanitizer::new(config.ad_placeholder_prefix()).unwrap();
    let prepared = prepare(&item, &sanitizer, &config).unwrap();
    let related = RelatedBundle {
        category: Some(item.categories[0].clone()),
        items: vec![RelatedItem::new(102, "evening-tide", "Evening Tide")],
    };

    let record = build_metadata(&item, &prepared, Some(related), &config);

    assert_eq!(record.title, "Harbour Morning");
    assert_eq!(record.description, "Read more about Harbour Morning");
    assert_eq!(record.open_graph.site_name, "Harbour Times");
    assert_eq!(
        record.open_graph.url.as_deref(),
        Some("https://www.example.com/posts/harbour-morning")
    );
    assert_eq!(
        record.open_graph.image.as_ref().map(|i| i.url.as_str()),
        Some("https://cms.example.com/wp-content/uploads/2023/02/nets.png")
    );
    assert_eq!(record.structured_data["publisher"]["name"], "Harbour Times");

    let related = record.related.unwrap();
    assert_eq!(related.label, "More from Local");
    assert_eq!(related.link.as_deref(), Some("/category/local"));
    assert_eq!(related.items[0].title, "Evening Tide");
}
