use axum::{Router, middleware, routing::get};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app_state::AppState,
    content::{
        CategoryRef, MetaTag, MetadataRecord, RelatedItem, RelatedSection,
        model::{OpenGraph, OpenGraphImage, TwitterCard},
    },
    error::ErrorResponse,
    guard::redirect_guard_middleware,
    health::{self, HealthResponse},
    pages::{self, PostPage},
};

#[derive(OpenApi)]
#[openapi(
    paths(pages::handlers::get_post, health::health_check),
    components(schemas(
        PostPage,
        MetadataRecord,
        OpenGraph,
        OpenGraphImage,
        TwitterCard,
        RelatedSection,
        RelatedItem,
        CategoryRef,
        MetaTag,
        ErrorResponse,
        HealthResponse
    )),
    tags(
        (name = "posts", description = "Post page data for the rendering layer"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Full HTTP surface. The redirect guard wraps the post routes only, so it
/// runs before any backend fetch for them. Posts answer on both `/posts/{slug}`
/// and the bare `/{slug}` permalink; deeper paths fall through to the
/// passthrough redirect.
pub fn router(state: AppState) -> Router {
    let posts = Router::new()
        .route("/posts/{slug}", get(pages::get_post))
        .route("/{slug}", get(pages::get_post))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            redirect_guard_middleware,
        ));

    Router::new()
        .merge(posts)
        .route("/healthz", get(health::health_check))
        .fallback(pages::passthrough)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}
