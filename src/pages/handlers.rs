use axum::{
    Json,
    extract::{Path, State},
    http::Uri,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{info, instrument};

use crate::{
    app_state::AppState,
    content,
    error::{AppError, ErrorResponse},
    pages::dtos::PostPage,
};

#[utoipa::path(
    get,
    path = "/posts/{slug}",
    tag = "posts",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post content and page metadata", body = PostPage),
        (status = 307, description = "Embedded-app traffic sent to the external host"),
        (status = 404, description = "No published post with this slug", body = ErrorResponse),
        (status = 500, description = "Post content could not be processed", body = ErrorResponse),
        (status = 502, description = "Content backend failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostPage>, AppError> {
    let item = state
        .source
        .post_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(slug.clone()))?;

    let prepared = content::prepare(&item, &state.sanitizer, &state.config)?;
    let related = state.source.related(&item.categories, item.id).await?;
    let metadata = content::build_metadata(&item, &prepared, related, &state.config);

    info!(
        post_id = item.id,
        images = metadata.images.len(),
        related = metadata.related.is_some(),
        "Post page assembled"
    );

    Ok(Json(PostPage {
        id: item.id,
        slug: item.slug.clone(),
        title: metadata.title.clone(),
        content_html: prepared.cleaned_html,
        meta_tags: metadata.meta_tags(),
        metadata,
    }))
}

/// Anything this service doesn't render lives on the external host.
pub async fn passthrough(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    let relative = format!("./{}", path.trim_start_matches('/'));
    match state.config.external_host().join(&relative) {
        Ok(target) => Redirect::temporary(target.as_str()).into_response(),
        Err(_) => AppError::NotFound(path.to_string()).into_response(),
    }
}
