//! API router.
//!
//! Returns a composable `Router` with every route nested under `/v1/ply`.
//! Layers (outermost → innermost): CORS → access log → body limit.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints::{self, documents, enrollments, locations, practices, providers, tasks};
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::controller::Controller;

/// Prefix shared by every route.
pub const API_PREFIX: &str = "/v1/ply";

/// Build the API router over a shared controller.
pub fn api_router(controller: Arc<Controller>) -> Router {
    build_router(ApiContext::new(controller))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (axum 0.7). Static segments
    // such as `/practice/list` take priority over `/practice/:practiceId`.
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/practice", post(practices::create))
        .route("/practice/list", get(practices::list))
        .route(
            "/practice/:practiceId",
            get(practices::read).post(practices::update),
        )
        .route("/practice/:practiceId/location", get(practices::locations))
        .route("/practice/:practiceId/provider", get(practices::providers))
        .route("/practice/:practiceId/task", get(practices::tasks))
        .route("/practice/:practiceId/enrollment", get(practices::enrollments))
        .route("/practice/:practiceId/document", get(practices::documents))
        .route("/practice/:practiceId/upload", post(documents::upload))
        .route(
            "/document/:documentId",
            get(documents::download).delete(documents::delete),
        )
        .route("/location", post(locations::create))
        .route(
            "/location/:locationId",
            get(locations::read)
                .post(locations::update)
                .delete(locations::delete),
        )
        .route("/provider", post(providers::create))
        .route(
            "/provider/:providerId",
            get(providers::read)
                .post(providers::update)
                .delete(providers::delete),
        )
        .route("/task", post(tasks::create))
        .route(
            "/task/:taskId",
            get(tasks::read).post(tasks::update).delete(tasks::delete),
        )
        .route("/enrollment", post(enrollments::create))
        .route(
            "/enrollment/:enrollmentId",
            get(enrollments::read)
                .post(enrollments::update)
                .delete(enrollments::delete),
        )
        .route(
            "/enrollment/:enrollmentId/activity",
            get(enrollments::activities),
        )
        .with_state(ctx);

    Router::new()
        .nest(API_PREFIX, routes)
        .layer(DefaultBodyLimit::max(documents::MAX_UPLOAD_BYTES))
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(cors_layer())
}

/// Any origin, GET and POST, any request header.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
