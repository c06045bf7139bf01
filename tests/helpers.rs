#![allow(dead_code)]

use axum::Router;
use serde_json::{Value, json};
use std::sync::Arc;
use url::Url;
use wiremock::MockServer;

use pressgate::{app, app_state::AppState, backend::WordPressClient, config::Config};

pub const EXTERNAL_HOST: &str = "https://www.example.com/";

pub fn test_config(server: &MockServer) -> Config {
    let backend = Url::parse(&format!("{}/", server.uri())).unwrap();
    Config::new("127.0.0.1:0", backend)
        .with_external_host(Url::parse(EXTERNAL_HOST).unwrap())
        .with_site_name("Harbour Times")
}

pub fn wordpress_client(server: &MockServer) -> WordPressClient {
    let backend = Url::parse(&format!("{}/", server.uri())).unwrap();
    WordPressClient::new(backend, 3).unwrap()
}

pub fn test_app(server: &MockServer) -> Router {
    let state = AppState::new(test_config(server), Arc::new(wordpress_client(server))).unwrap();
    app::router(state)
}

/// A post as `/wp-json/wp/v2/posts?slug=...&_embed=1` returns it.
pub fn wp_post(id: u64, slug: &str, title: &str, content: &str) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "link": format!("https://cms.example.com/{slug}/"),
        "date_gmt": "2023-01-05T10:00:00",
        "modified_gmt": "2023-01-06T08:30:00",
        "title": { "rendered": title },
        "content": { "rendered": content, "protected": false },
        "categories": [4],
        "yoast_head_json": {
            "og_image": [{ "url": "https://cdn.example.com/og.png" }]
        },
        "_embedded": {
            "author": [{ "name": "Sam Writer" }],
            "wp:term": [[{ "id": 4, "name": "Local", "slug": "local", "taxonomy": "category" }]]
        }
    })
}

pub fn wp_summary(id: u64, slug: &str, title: &str) -> Value {
    json!({ "id": id, "slug": slug, "title": { "rendered": title } })
}
