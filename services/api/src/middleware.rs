//! Session resolution and the authorization gate

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use axum_extra::{
    extract::cookie::CookieJar,
    headers::{Authorization, HeaderMapExt, authorization::Bearer},
};
use common::models::Identity;
use tracing::debug;

use crate::{error::ApiError, state::AppState};

/// Attach the caller's [`Identity`] to the request when its session is valid
///
/// Requests without a valid session continue anonymously; rejecting them is
/// left to [`require_session`] on the routes that need it.
pub async fn resolve_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = session_token(req.headers(), &state.config.session_cookie) {
        match state.session_verifier.verify(&token) {
            Ok(identity) => {
                debug!("Session resolved for {}", identity.sub);
                req.extensions_mut().insert(identity);
            }
            Err(e) => debug!("Ignoring invalid session: {}", e),
        }
    }

    next.run(req).await
}

/// Reject requests that carry no authenticated session
pub async fn require_session(req: Request, next: Next) -> Result<Response, ApiError> {
    if req.extensions().get::<Identity>().is_none() {
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(req).await)
}

/// Put a route behind [`require_session`]
pub fn protected(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn(require_session))
}

/// Session token from the session cookie, falling back to a bearer token
fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        return Some(cookie.value().to_string());
    }

    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}
