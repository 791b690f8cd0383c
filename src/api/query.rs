//! Versioned dashboard query endpoint
//!
//! `GET/POST /modules/gql/query/v2` takes the query document in the `q`
//! parameter and always answers HTTP 200 with the
//! `{"data": ..., "errors": [...]}` envelope; partial success is expected.
//! An empty `q` short-circuits before the schema is touched.

use axum::extract::{Form, Query, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::AppState;
use crate::graphql::QueryFlags;

use super::viewer_from_headers;

pub const MISSING_QUERY_ERROR: &str = "Missing required query parameter \"q\"";

#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    pub q: Option<String>,
    #[serde(default)]
    pub expand_tags: Option<bool>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/modules/gql/query/v2", get(query_v2_get).post(query_v2_post))
}

async fn query_v2_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<QueryParams>,
) -> Json<Value> {
    Json(run_query(&state, &headers, params).await)
}

async fn query_v2_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(params): Form<QueryParams>,
) -> Json<Value> {
    Json(run_query(&state, &headers, params).await)
}

async fn run_query(state: &AppState, headers: &HeaderMap, params: QueryParams) -> Value {
    let Some(q) = params.q.filter(|q| !q.trim().is_empty()) else {
        return json!({ "data": null, "errors": [MISSING_QUERY_ERROR] });
    };

    let flags = QueryFlags {
        expand_tags: params.expand_tags.unwrap_or(false),
    };

    let mut request = async_graphql::Request::new(q.clone()).data(flags);
    if let Some(viewer) = viewer_from_headers(headers, &state.config.jwt_secret) {
        request = request.data(viewer);
    }

    let response = state.schema.execute(request).await;

    // A request-level failure (parse/validation) carries errors without a
    // field path and no data. Outside production it is logged with the
    // query text and full error detail; in production, message only.
    let request_level =
        !response.errors.is_empty() && response.errors.iter().all(|err| err.path.is_empty());
    if request_level {
        for err in &response.errors {
            if state.config.production_mode {
                tracing::error!(error = %err.message, "GraphQL error with query");
            } else {
                tracing::error!(query = %q, error = ?err, "GraphQL error with query");
            }
        }
        let messages: Vec<String> = response.errors.iter().map(|e| e.message.clone()).collect();
        return json!({ "data": null, "errors": messages });
    }

    for err in &response.errors {
        tracing::error!(error = %err.message, "GraphQL execute error");
    }

    let data = serde_json::to_value(&response.data).unwrap_or(Value::Null);
    let messages: Vec<String> = response.errors.iter().map(|e| e.message.clone()).collect();
    json!({ "data": data, "errors": messages })
}
