use std::sync::Arc;

use crate::backend::ContentSource;
use crate::config::Config;
use crate::content::{ContentError, ContentSanitizer};

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn ContentSource>,
    pub sanitizer: Arc<ContentSanitizer>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn ContentSource>) -> Result<Self, ContentError> {
        let sanitizer = ContentSanitizer::new(config.ad_placeholder_prefix())?;
        Ok(Self {
            config: Arc::new(config),
            source,
            sanitizer: Arc::new(sanitizer),
        })
    }
}
