//! Session and user profile routes

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use common::models::{AuthStatus, Identity};
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult, internal},
    middleware::protected,
    state::AppState,
};

/// User routes, relative to the API prefix
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/check-auth", get(check_auth))
        .route("/user/:id", protected(get(get_profile)))
}

/// Landing endpoint after login
///
/// Authenticated callers get a local user provisioned and are sent back to
/// the client; provisioning failures never block the redirect.
pub async fn root(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
) -> Response {
    let Some(Extension(identity)) = identity else {
        return "Logged out".into_response();
    };

    match state.user_repository.get_or_create(&identity).await {
        Ok(provisioned) if provisioned.created => {
            info!("Created user {} on first login", provisioned.user.id)
        }
        Ok(provisioned) => info!("User {} already exists", provisioned.user.id),
        Err(e) => error!("Failed to provision user {}: {:#}", identity.sub, e),
    }

    Redirect::to(&state.config.client_url).into_response()
}

/// Report whether the caller holds a session, with its claims
pub async fn check_auth(identity: Option<Extension<Identity>>) -> Json<AuthStatus> {
    let user = identity.map(|Extension(identity)| identity);

    Json(AuthStatus {
        is_authenticated: user.is_some(),
        user,
    })
}

/// Profile lookup by external subject id
pub async fn get_profile(
    State(state): State<AppState>,
    Path(auth0_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_repository
        .find_by_auth0_id(&auth0_id)
        .await
        .map_err(internal("Failed to get user"))?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}
