//! Syllabus backend - course dashboard read API
//!
//! Exposes the course content tree (courses, units, lessons) over GraphQL
//! with per-viewer progress augmentation. The API is read-only; content is
//! authored on disk and progress rows are written by the host application.

pub mod api;
pub mod config;
pub mod content;
pub mod db;
pub mod extensions;
pub mod graphql;

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::content::SiteRegistry;
use crate::db::Database;
use crate::graphql::DashboardSchema;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub schema: DashboardSchema,
    pub registry: Arc<SiteRegistry>,
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        // Health endpoints (no auth required)
        .merge(api::health::router())
        // Versioned dashboard query endpoint
        .merge(api::query::router())
        // Native GraphQL endpoint
        .route("/graphql", get(graphiql).post(graphql_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GraphQL query handler with viewer context
async fn graphql_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner().data(graphql::QueryFlags::default());

    if let Some(viewer) = api::viewer_from_headers(&headers, &state.config.jwt_secret) {
        request = request.data(viewer);
    }

    state.schema.execute(request).await.into()
}

/// GraphiQL interactive playground (only for browsers)
async fn graphiql(headers: HeaderMap) -> impl IntoResponse {
    // Check if this is a browser request (accepts HTML)
    let accepts_html = headers
        .get(axum::http::header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    if accepts_html {
        axum::response::Html(GraphiQLSource::build().endpoint("/graphql").finish())
            .into_response()
    } else {
        (
            axum::http::StatusCode::METHOD_NOT_ALLOWED,
            axum::Json(serde_json::json!({
                "error": "GET requests are not supported for GraphQL queries. Use POST with Content-Type: application/json"
            })),
        )
            .into_response()
    }
}
