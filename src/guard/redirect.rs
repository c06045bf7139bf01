use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, info};
use url::Url;

use crate::app_state::AppState;
use crate::guard::classifier::RequestHeaders;

/// Outcome of the redirect check for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDecision {
    pub should_redirect: bool,
    pub target_url: Option<Url>,
}

impl RedirectDecision {
    fn pass() -> Self {
        Self {
            should_redirect: false,
            target_url: None,
        }
    }

    fn redirect_to(target: Url) -> Self {
        Self {
            should_redirect: true,
            target_url: Some(target),
        }
    }
}

/// Decide whether the request must leave the embedded browser. Only the path
/// of `request_url` survives into the target; query and fragment are dropped.
pub fn decide(
    request_url: &str,
    headers: RequestHeaders<'_>,
    external_host: &Url,
) -> RedirectDecision {
    if !headers.is_embedded_app_traffic() {
        return RedirectDecision::pass();
    }

    // "./" keeps a path like "/x:y" from being parsed as a scheme.
    let path = request_path(request_url);
    let relative = format!("./{}", path.trim_start_matches('/'));
    match external_host.join(&relative) {
        Ok(target) => RedirectDecision::redirect_to(target),
        // The external host is validated at startup, so a failed join means a
        // path we can't express; let the page render instead.
        Err(_) => RedirectDecision::pass(),
    }
}

fn request_path(request_url: &str) -> String {
    match Url::parse(request_url) {
        Ok(absolute) => absolute.path().to_string(),
        Err(_) => path_only(request_url).to_string(),
    }
}

fn path_only(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Runs before any page handler. Embedded-app traffic gets a 307 to the
/// external host and the inner service is never called.
pub async fn redirect_guard_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let decision = {
        let headers = req.headers();
        let request_headers = RequestHeaders::new(
            header_str(headers, header::REFERER),
            header_str(headers, header::USER_AGENT),
        );
        let request_url = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| req.uri().path());
        decide(request_url, request_headers, state.config.external_host())
    };

    match decision.target_url {
        Some(target) if decision.should_redirect => {
            info!(path = %req.uri().path(), target = %target, "Redirecting embedded-app traffic");
            Redirect::temporary(target.as_str()).into_response()
        }
        _ => {
            debug!(path = %req.uri().path(), "No redirect needed");
            next.run(req).await
        }
    }
}

// Header values that aren't valid visible ASCII are treated as absent.
fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
