use crate::AppState;
use crate::api::error::AppError;
use crate::api::middleware::auth::session_claims;
use crate::api::views;
use crate::entities::{prelude::*, users};
use crate::utils::auth::{
    create_jwt, expired_session_cookie, safe_next, session_cookie, verify_password,
};
use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub next: Option<String>,
}

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn login_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LoginQuery>,
) -> Response {
    if session_claims(&state, &headers).await.is_some() {
        let target = safe_next(query.next.as_deref()).unwrap_or("/admin");
        return Redirect::to(target).into_response();
    }
    Html(views::login_page(query.next.as_deref(), None)).into_response()
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim().to_lowercase();
    let user = Users::find()
        .filter(users::Column::Email.eq(email.as_str()))
        .one(&state.db)
        .await?;

    let user = match user {
        Some(u) if u.active && verify_password(&form.password, &u.password) => u,
        _ => {
            tracing::warn!("🔒 Failed login attempt for '{}'", email);
            let page = views::login_page(form.next.as_deref(), Some(INVALID_CREDENTIALS));
            return Ok((StatusCode::UNAUTHORIZED, Html(page)).into_response());
        }
    };

    let token = create_jwt(
        user.id,
        &user.email,
        &state.config.secret_key,
        state.config.session_hours,
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    let target = safe_next(form.next.as_deref()).unwrap_or("/admin");
    tracing::info!("🔑 User {} signed in", user.email);

    Ok((
        [(header::SET_COOKIE, session_cookie(&token, state.config.session_hours))],
        Redirect::to(target),
    )
        .into_response())
}

pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}
