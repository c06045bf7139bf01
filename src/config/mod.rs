//! Configuration handling for the application.
//!
//! Everything the pipeline needs from the process environment is read once
//! here, at startup, and handed to the components as a read-only `Config`.
//! `Config::from_env` falls back to development defaults for every variable
//! that is absent, but rejects values that are present and malformed.

use std::env;

use thiserror::Error;
use url::Url;

/// Environment variable names. Keeping them public lets tests and deployment
/// tooling refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_BACKEND_URL: &str = "BACKEND_URL";
pub const ENV_EXTERNAL_HOST: &str = "EXTERNAL_HOST";
pub const ENV_UPLOADS_BASE_URL: &str = "UPLOADS_BASE_URL";
pub const ENV_IMAGE_HOST: &str = "IMAGE_HOST";
pub const ENV_SITE_NAME: &str = "SITE_NAME";
pub const ENV_DEFAULT_IMAGE_WIDTH: &str = "DEFAULT_IMAGE_WIDTH";
pub const ENV_DEFAULT_IMAGE_HEIGHT: &str = "DEFAULT_IMAGE_HEIGHT";
pub const ENV_TITLE_OVERRIDE_ENABLED: &str = "TITLE_OVERRIDE_ENABLED";
pub const ENV_AD_PLACEHOLDER_PREFIX: &str = "AD_PLACEHOLDER_PREFIX";
pub const ENV_RELATED_POSTS_COUNT: &str = "RELATED_POSTS_COUNT";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/";
const DEFAULT_SITE_NAME: &str = "pressgate";
const DEFAULT_IMAGE_WIDTH: u32 = 2000;
const DEFAULT_IMAGE_HEIGHT: u32 = 1000;
const DEFAULT_AD_PLACEHOLDER_PREFIX: &str = "quads-ad";
const DEFAULT_RELATED_POSTS_COUNT: u8 = 5;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    backend_url: Url,
    external_host: Url,
    uploads_base_url: Url,
    image_host: Option<Url>,
    site_name: String,
    default_image_width: u32,
    default_image_height: u32,
    title_override_enabled: bool,
    ad_placeholder_prefix: String,
    related_posts_count: u8,
}

impl Config {
    /// Create a config around a single WordPress host; every URL setting
    /// points at it and the rest takes development defaults.
    pub fn new(bind_addr: impl Into<String>, backend_url: Url) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            external_host: backend_url.clone(),
            uploads_base_url: backend_url.clone(),
            backend_url,
            image_host: None,
            site_name: DEFAULT_SITE_NAME.to_string(),
            default_image_width: DEFAULT_IMAGE_WIDTH,
            default_image_height: DEFAULT_IMAGE_HEIGHT,
            title_override_enabled: false,
            ad_placeholder_prefix: DEFAULT_AD_PLACEHOLDER_PREFIX.to_string(),
            related_posts_count: DEFAULT_RELATED_POSTS_COUNT,
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let backend_url = match env::var(ENV_BACKEND_URL) {
            Ok(raw) => parse_base_url("backend_url", &raw)?,
            Err(_) => parse_base_url("backend_url", DEFAULT_BACKEND_URL)?,
        };

        let mut config = Self::new(bind_addr, backend_url);

        if let Ok(raw) = env::var(ENV_EXTERNAL_HOST) {
            config.external_host = parse_base_url("external_host", &raw)?;
        }
        if let Ok(raw) = env::var(ENV_UPLOADS_BASE_URL) {
            config.uploads_base_url = parse_base_url("uploads_base_url", &raw)?;
        }
        if let Ok(raw) = env::var(ENV_IMAGE_HOST) {
            config.image_host = Some(parse_base_url("image_host", &raw)?);
        }
        if let Ok(name) = env::var(ENV_SITE_NAME) {
            config.site_name = name;
        }
        if let Ok(raw) = env::var(ENV_DEFAULT_IMAGE_WIDTH) {
            config.default_image_width = parse_number("default_image_width", &raw)?;
        }
        if let Ok(raw) = env::var(ENV_DEFAULT_IMAGE_HEIGHT) {
            config.default_image_height = parse_number("default_image_height", &raw)?;
        }
        if let Ok(raw) = env::var(ENV_TITLE_OVERRIDE_ENABLED) {
            config.title_override_enabled = parse_flag("title_override_enabled", &raw)?;
        }
        if let Ok(prefix) = env::var(ENV_AD_PLACEHOLDER_PREFIX) {
            config.ad_placeholder_prefix = validate_prefix(prefix)?;
        }
        if let Ok(raw) = env::var(ENV_RELATED_POSTS_COUNT) {
            config.related_posts_count = parse_number("related_posts_count", &raw)?;
        }

        Ok(config)
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// WordPress host serving the REST API.
    pub fn backend_url(&self) -> &Url {
        &self.backend_url
    }
    /// Host that embedded-app traffic is redirected to.
    pub fn external_host(&self) -> &Url {
        &self.external_host
    }
    /// Public host that `wp-content/uploads` paths are resolved against.
    pub fn uploads_base_url(&self) -> &Url {
        &self.uploads_base_url
    }
    pub fn image_host(&self) -> Option<&Url> {
        self.image_host.as_ref()
    }
    pub fn site_name(&self) -> &str {
        &self.site_name
    }
    pub fn default_image_width(&self) -> u32 {
        self.default_image_width
    }
    pub fn default_image_height(&self) -> u32 {
        self.default_image_height
    }
    /// Whether the SEO plugin title replaces the post title in metadata.
    pub fn title_override_enabled(&self) -> bool {
        self.title_override_enabled
    }
    pub fn ad_placeholder_prefix(&self) -> &str {
        &self.ad_placeholder_prefix
    }
    pub fn related_posts_count(&self) -> u8 {
        self.related_posts_count
    }

    pub fn with_external_host(mut self, external_host: Url) -> Self {
        self.external_host = external_host;
        self
    }

    pub fn with_uploads_base_url(mut self, uploads_base_url: Url) -> Self {
        self.uploads_base_url = uploads_base_url;
        self
    }

    pub fn with_image_host(mut self, image_host: Url) -> Self {
        self.image_host = Some(image_host);
        self
    }

    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    pub fn with_title_override(mut self, enabled: bool) -> Self {
        self.title_override_enabled = enabled;
        self
    }

    /// Development defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        // not `Default` impl yet to keep explicit semantics
        let backend_url =
            Url::parse(DEFAULT_BACKEND_URL).expect("default backend url is a valid url");
        Self::new(DEFAULT_BIND_ADDR, backend_url)
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Base URLs are joined against later, so a missing trailing slash would
/// silently drop their last path segment. Normalize it here.
fn parse_base_url(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("'{raw}' cannot be used as a base url"),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_number<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })
}

fn parse_flag(field: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field,
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

// The prefix ends up inside a quoted CSS attribute selector.
fn validate_prefix(prefix: String) -> Result<String, ConfigError> {
    if prefix.is_empty() || prefix.contains(['"', '\\', '\n']) {
        return Err(ConfigError::InvalidValue {
            field: "ad_placeholder_prefix",
            reason: format!("'{prefix}' is not usable as an id prefix"),
        });
    }
    Ok(prefix)
}
