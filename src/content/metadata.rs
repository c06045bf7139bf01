use scraper::Html;
use serde_json::{Map, Value, json};
use url::Url;

use crate::content::model::{
    ContentItem, MetadataRecord, OpenGraph, OpenGraphImage, RelatedBundle, RelatedSection,
    SiteDefaults, TwitterCard, post_path,
};

const GENERIC_RELATED_LABEL: &str = "More Posts";
const NON_PROSE_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Builds the page metadata for one post. Pure: every input is already
/// resolved and the item is left as it was.
pub fn assemble(
    item: &ContentItem,
    cleaned_html: &str,
    image_urls: &[Url],
    related: Option<RelatedBundle>,
    site: &SiteDefaults,
) -> MetadataRecord {
    let title = resolve_title(item, site.title_override_enabled);
    let description = resolve_description(item);
    let page_url = site
        .site_url
        .join(post_path(&item.slug).trim_start_matches('/'))
        .ok()
        .map(String::from)
        .or_else(|| non_blank(item.link.as_deref()).map(str::to_string));
    let primary_image = image_urls.first().map(Url::to_string);

    let open_graph = OpenGraph {
        og_type: "article".to_string(),
        title: title.clone(),
        description: description.clone(),
        url: page_url.clone(),
        site_name: site.site_name.clone(),
        image: primary_image.as_ref().map(|url| OpenGraphImage {
            url: url.clone(),
            secure_url: url.clone(),
            width: site.default_image_width,
            height: site.default_image_height,
            alt: title.clone(),
        }),
    };

    let twitter = TwitterCard {
        card: "summary_large_image".to_string(),
        title: title.clone(),
        description: description.clone(),
        image: primary_image,
    };

    let structured_data = article_json_ld(
        item,
        &title,
        &description,
        page_url.as_deref(),
        image_urls,
        word_count(cleaned_html),
        &site.site_name,
    );

    MetadataRecord {
        title,
        description,
        images: image_urls.to_vec(),
        open_graph,
        twitter,
        structured_data,
        related: related_section(related),
    }
}

fn resolve_title(item: &ContentItem, title_override_enabled: bool) -> String {
    if title_override_enabled
        && let Some(meta_title) = non_blank(item.meta_title.as_deref())
    {
        return meta_title.to_string();
    }
    item.title.clone()
}

fn resolve_description(item: &ContentItem) -> String {
    non_blank(item.description.as_deref())
        .or_else(|| non_blank(item.og_description.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Read more about {}", item.title))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn related_section(related: Option<RelatedBundle>) -> Option<RelatedSection> {
    let RelatedBundle { category, items } = related?;
    let category = category?;
    if items.is_empty() {
        return None;
    }

    let section = match non_blank(Some(category.name.as_str())) {
        Some(name) => RelatedSection {
            label: format!("More from {name}"),
            link: Some(category.path.clone()),
            items,
        },
        None => RelatedSection {
            label: GENERIC_RELATED_LABEL.to_string(),
            link: None,
            items,
        },
    };
    Some(section)
}

fn word_count(html: &str) -> usize {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .descendants()
        .filter(|node| {
            !node
                .ancestors()
                .filter_map(|ancestor| ancestor.value().as_element())
                .any(|element| NON_PROSE_ELEMENTS.contains(&element.name()))
        })
        .filter_map(|node| node.value().as_text())
        .map(|text| text.split_whitespace().count())
        .sum()
}

fn article_json_ld(
    item: &ContentItem,
    title: &str,
    description: &str,
    page_url: Option<&str>,
    images: &[Url],
    word_count: usize,
    site_name: &str,
) -> Value {
    let mut article = Map::new();
    article.insert("@context".into(), json!("https://schema.org"));
    article.insert("@type".into(), json!("Article"));
    article.insert("headline".into(), json!(title));
    article.insert("description".into(), json!(description));
    if let Some(url) = page_url {
        article.insert(
            "mainEntityOfPage".into(),
            json!({ "@type": "WebPage", "@id": url }),
        );
    }
    if !images.is_empty() {
        let images: Vec<&str> = images.iter().map(Url::as_str).collect();
        article.insert("image".into(), json!(images));
    }
    if let Some(published) = item.published_at {
        article.insert("datePublished".into(), json!(published.to_rfc3339()));
    }
    if let Some(modified) = item.modified_at {
        article.insert("dateModified".into(), json!(modified.to_rfc3339()));
    }
    if let Some(author) = non_blank(item.author.as_deref()) {
        article.insert("author".into(), json!({ "@type": "Person", "name": author }));
    }
    article.insert(
        "publisher".into(),
        json!({ "@type": "Organization", "name": site_name }),
    );
    article.insert("wordCount".into(), json!(word_count));
    Value::Object(article)
}
