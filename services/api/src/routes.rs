//! API service routes

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::{config::ServiceConfig, middleware::resolve_session, state::AppState};

pub mod jobs;
pub mod users;

/// Route groups mounted under the API prefix
fn api_route_groups() -> [Router<AppState>; 2] {
    [jobs::routes(), users::routes()]
}

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let api = api_route_groups()
        .into_iter()
        .fold(Router::new(), |router, group| router.merge(group));

    let router = Router::new()
        .route("/", get(users::root))
        .route("/health", get(health_check));

    let router = if state.config.api_prefix.is_empty() {
        router.merge(api)
    } else {
        router.nest(&state.config.api_prefix, api)
    };

    router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_session,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

/// CORS for the frontend origin, with credentials so the session cookie flows
fn cors_layer(config: &ServiceConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    match HeaderValue::from_str(&config.client_url) {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            warn!("Invalid client URL {:?}, CORS disabled: {}", config.client_url, e);
            cors
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "job-board-api"
    }))
}
