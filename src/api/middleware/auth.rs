use crate::AppState;
use crate::entities::prelude::*;
use crate::utils::auth::{Claims, SESSION_COOKIE, cookie_value, validate_jwt};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use sea_orm::EntityTrait;

fn request_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    bearer.or_else(|| {
        headers
            .get(header::COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|c| cookie_value(c, SESSION_COOKIE))
            .filter(|v| !v.is_empty())
            .map(|s| s.to_string())
    })
}

/// `/login?next=<path>` for the request being turned away.
pub fn login_redirect_target(req: &Request) -> String {
    let next = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    format!(
        "/login?next={}",
        utf8_percent_encode(next, NON_ALPHANUMERIC)
    )
}

/// Claims of the session carried by these headers, if it is valid and its user
/// still exists and is active.
pub async fn session_claims(state: &AppState, headers: &HeaderMap) -> Option<Claims> {
    let token = request_token(headers)?;
    let claims = validate_jwt(&token, &state.config.secret_key).ok()?;
    let user_id = claims.user_id()?;

    match Users::find_by_id(user_id).one(&state.db).await {
        Ok(Some(user)) if user.active => Some(claims),
        Ok(_) => {
            tracing::debug!("Session for missing or inactive user {}", user_id);
            None
        }
        Err(e) => {
            tracing::error!("Session lookup failed: {:?}", e);
            None
        }
    }
}

/// Guards the admin surface. Anonymous requests are sent to the login page
/// with their original location in `next`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(claims) = session_claims(&state, req.headers()).await {
        req.extensions_mut().insert(claims);
        return next.run(req).await;
    }

    Redirect::to(&login_redirect_target(&req)).into_response()
}
