#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use pressgate::content::{ContentSanitizer, extract_image_urls};
use pressgate::guard::is_embedded_app_traffic;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data).into_owned();

    // None of these may panic, whatever the backend hands us.
    let sanitizer = ContentSanitizer::new("quads-ad").unwrap();
    if let Ok(cleaned) = sanitizer.clean(&html) {
        let base = Url::parse("https://cms.example.com/").unwrap();
        let _ = extract_image_urls(&cleaned, None, &base);
    }

    let (referer, user_agent) = html.split_once('\n').unwrap_or((html.as_str(), ""));
    let _ = is_embedded_app_traffic(Some(referer), Some(user_agent));
});
