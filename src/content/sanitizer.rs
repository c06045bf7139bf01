use scraper::{Html, Selector};
use tracing::debug;

use crate::content::errors::ContentError;

const MAX_PASSES: usize = 8;

/// Strips ad placeholders injected by the WordPress ad plugin from post HTML.
#[derive(Debug, Clone)]
pub struct ContentSanitizer {
    prefix: String,
    selector: Selector,
}

impl ContentSanitizer {
    /// Builds a sanitizer removing every element whose `id` starts with `prefix`.
    pub fn new(prefix: &str) -> Result<Self, ContentError> {
        let selector = Selector::parse(&format!(r#"[id^="{prefix}"]"#))
            .map_err(|e| ContentError::Selector(format!("{e:?}")))?;
        Ok(Self {
            prefix: prefix.to_string(),
            selector,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Removes the ad placeholders and re-serializes the fragment. Input
    /// without any placeholder comes back untouched.
    pub fn clean(&self, raw_html: &str) -> Result<String, ContentError> {
        // html5ever would quietly swap NUL for U+FFFD and change the content.
        if raw_html.contains('\0') {
            return Err(ContentError::Unparseable(
                "content contains NUL characters".to_string(),
            ));
        }

        let Some(mut cleaned) = self.strip_pass(raw_html)? else {
            return Ok(raw_html.to_string());
        };

        // Raw text inside foreign content (`<math>`, `<svg>`) can come back as
        // markup once serialized, so keep stripping until a re-parse is clean.
        for _ in 0..MAX_PASSES {
            match self.strip_pass(&cleaned)? {
                Some(next) => cleaned = next,
                None => return Ok(cleaned),
            }
        }

        Err(ContentError::Unparseable(
            "ad placeholders keep reappearing after serialization".to_string(),
        ))
    }

    /// One parse/detach/serialize round. `None` when nothing matched.
    fn strip_pass(&self, html: &str) -> Result<Option<String>, ContentError> {
        let mut fragment = Html::parse_fragment(html);
        let ads: Vec<_> = fragment.select(&self.selector).map(|el| el.id()).collect();
        if ads.is_empty() {
            return Ok(None);
        }

        debug!(count = ads.len(), prefix = %self.prefix, "Removing ad placeholders");
        for id in ads {
            let mut node = fragment.tree.get_mut(id).ok_or(ContentError::MissingNode)?;
            node.detach();
        }

        Ok(Some(fragment.root_element().inner_html()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitizer() -> ContentSanitizer {
        ContentSanitizer::new("quads-ad").unwrap()
    }

    #[test]
    fn test_removes_ad_placeholders() {
        let html = r#"<p class="intro">First</p><div id="quads-ad-1" class="quads-location"><script>ad()</script></div><p>Second <em>para</em></p>"#;
        let cleaned = sanitizer().clean(html).unwrap();

        assert!(!cleaned.contains("quads-ad-1"));
        assert!(!cleaned.contains("ad()"));
        assert_eq!(
            cleaned,
            r#"<p class="intro">First</p><p>Second <em>para</em></p>"#
        );
    }

    #[test]
    fn test_removes_nested_and_repeated_placeholders() {
        let html = r#"<section><h2 id="top">Top</h2><div id="quads-ad2"><div id="quads-ad3">x</div></div><p>Body</p><span id="quads-ad">y</span></section>"#;
        let cleaned = sanitizer().clean(html).unwrap();

        assert_eq!(
            cleaned,
            r#"<section><h2 id="top">Top</h2><p>Body</p></section>"#
        );
    }

    #[test]
    fn test_prefix_must_start_the_id() {
        let html = r#"<div id="not-quads-ad">keep</div><div class="quads-ad">keep too</div>"#;
        let cleaned = sanitizer().clean(html).unwrap();

        assert_eq!(cleaned, html);
    }

    #[test]
    fn test_clean_html_is_returned_unchanged() {
        let html = "<p>No ads here<br/>at all</p>\n<img src=\"/a.jpg\" alt='x'>";
        assert_eq!(sanitizer().clean(html).unwrap(), html);
    }

    #[test]
    fn test_idempotent() {
        let html = r#"<p>One</p><div id="quads-ad-9">ad</div><p>Two<br/>lines</p>"#;
        let once = sanitizer().clean(html).unwrap();
        let twice = sanitizer().clean(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_placeholders_surfacing_from_foreign_content_are_removed() {
        let html = r#"<div id="quads-ad-1"></div><math><mtext><table><mglyph><style><img id="quads-ad-3" src=x></style></table></mtext></math>"#;
        let once = sanitizer().clean(html).unwrap();
        let twice = sanitizer().clean(&once).unwrap();

        assert!(!once.contains("quads-ad"), "{once}");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_nul_bytes_are_an_error() {
        let result = sanitizer().clean("<p>bad\0byte</p>");
        assert!(matches!(result, Err(ContentError::Unparseable(_))));
    }

    #[test]
    fn test_custom_prefix() {
        let sanitizer = ContentSanitizer::new("adsense-").unwrap();
        let cleaned = sanitizer
            .clean(r#"<p>a</p><ins id="adsense-slot">x</ins><div id="quads-ad-1">b</div>"#)
            .unwrap();

        assert_eq!(cleaned, r#"<p>a</p><div id="quads-ad-1">b</div>"#);
        assert_eq!(sanitizer.prefix(), "adsense-");
    }

    #[test]
    fn test_invalid_prefix_is_rejected() {
        assert!(matches!(
            ContentSanitizer::new("bad\"prefix"),
            Err(ContentError::Selector(_))
        ));
    }

    #[cfg(feature = "fuzz")]
    mod fuzz {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clean_is_idempotent(html in "[^\\x00]{0,200}") {
                let sanitizer = sanitizer();
                let once = sanitizer.clean(&html).unwrap();
                let twice = sanitizer.clean(&once).unwrap();
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn clean_never_leaves_placeholders(
                before in "[a-z ]{0,20}",
                after in "[a-z ]{0,20}",
                n in 0u32..100,
            ) {
                let html = format!(r#"<p>{before}</p><div id="quads-ad-{n}">ad</div><p>{after}</p>"#);
                let cleaned = sanitizer().clean(&html).unwrap();
                prop_assert!(!cleaned.contains("quads-ad"));
            }
        }
    }
}
