use regex::Regex;
use std::sync::LazyLock;

/// Referer pointing at facebook.com or any of its subdomains.
static FACEBOOK_REFERER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://([^/]+\.)?facebook\.com(/|$)").unwrap());

/// Tokens the Facebook iOS/Android apps put in their in-app browser user agent.
static FACEBOOK_APP_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)FBAN|FBAV").unwrap());

const LINK_PREVIEW_CRAWLER_TOKEN: &str = "facebookexternalhit";

/// Request headers the classifier looks at. Either may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestHeaders<'a> {
    pub referer: Option<&'a str>,
    pub user_agent: Option<&'a str>,
}

impl<'a> RequestHeaders<'a> {
    pub fn new(referer: Option<&'a str>, user_agent: Option<&'a str>) -> Self {
        Self {
            referer,
            user_agent,
        }
    }

    pub fn is_embedded_app_traffic(&self) -> bool {
        is_embedded_app_traffic(self.referer, self.user_agent)
    }
}

/// Returns true when the request comes from Facebook's in-app browser and
/// should be bounced out of it. The link-preview crawler is never bounced.
pub fn is_embedded_app_traffic(referer: Option<&str>, user_agent: Option<&str>) -> bool {
    from_facebook_referer(referer, user_agent) || from_facebook_app(referer, user_agent)
}

fn from_facebook_referer(referer: Option<&str>, user_agent: Option<&str>) -> bool {
    let Some(referer) = referer else {
        return false;
    };
    let is_crawler = user_agent.is_some_and(|ua| ua.contains(LINK_PREVIEW_CRAWLER_TOKEN));

    FACEBOOK_REFERER_REGEX.is_match(referer) && !is_crawler
}

fn from_facebook_app(referer: Option<&str>, user_agent: Option<&str>) -> bool {
    let (Some(referer), Some(user_agent)) = (referer, user_agent) else {
        return false;
    };

    FACEBOOK_APP_TOKEN_REGEX.is_match(user_agent)
        && !user_agent.contains("face")
        && referer.contains("facebook.com")
}
