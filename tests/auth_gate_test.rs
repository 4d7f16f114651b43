use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use portfolio_backend::config::AppConfig;
use portfolio_backend::entities::{prelude::*, *};
use portfolio_backend::infrastructure::database;
use portfolio_backend::services::storage::LocalStorageService;
use portfolio_backend::{AppState, create_app};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const EMAIL: &str = "admin@example.com";
const PASSWORD: &str = "s3cret-pass";

async fn setup() -> (AppState, TempDir) {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::development();
    config.upload_dir = dir.path().to_path_buf();
    config.admin_email = Some(EMAIL.to_string());
    config.admin_password = Some(PASSWORD.to_string());

    let db = database::setup_database(&config).await.unwrap();
    let storage = Arc::new(LocalStorageService::new(dir.path()));
    (AppState::new(db, storage, config), dir)
}

async fn send(state: &AppState, request: Request<Body>) -> Response {
    create_app(state.clone()).oneshot(request).await.unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn login_request(email: &str, password: &str, next: &str) -> Request<Body> {
    let form = serde_urlencoded::to_string([
        ("email", email),
        ("password", password),
        ("next", next),
    ])
    .unwrap();
    Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap()
}

/// Logs in and returns the `session=...` pair to send back as a cookie.
async fn login(state: &AppState) -> String {
    let response = send(state, login_request(EMAIL, PASSWORD, "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

fn with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_anonymous_admin_request_redirects_to_login() {
    let (state, _dir) = setup().await;

    let response = send(
        &state,
        Request::builder()
            .uri("/admin/fotos?page=2")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fadmin%2Ffotos%3Fpage%3D2");

    // Mutations are gated as well and leave no trace
    let response = send(
        &state,
        Request::builder()
            .method("DELETE")
            .uri("/admin/tipos/1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_invalid_token_redirects() {
    let (state, _dir) = setup().await;

    let response = send(
        &state,
        Request::builder()
            .uri("/admin")
            .header(header::AUTHORIZATION, "Bearer not-a-token")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fadmin");
}

#[tokio::test]
async fn test_login_form_carries_next() {
    let (state, _dir) = setup().await;

    let response = send(
        &state,
        Request::builder()
            .uri("/login?next=%2Fadmin%2Ffotos")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = text(response).await;
    assert!(body.contains("value=\"/admin/fotos\""));
}

#[tokio::test]
async fn test_login_flow() {
    let (state, _dir) = setup().await;

    let response = send(&state, login_request(EMAIL, "wrong-pass", "/admin/fotos")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body = text(response).await;
    assert!(body.contains("Invalid credentials"));
    assert!(body.contains("value=\"/admin/fotos\""));

    let response = send(&state, login_request("ADMIN@example.com", PASSWORD, "/admin/fotos")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/fotos");
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let cookie = set_cookie.split(';').next().unwrap().to_string();
    let response = send(&state, with_cookie("/admin", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await.contains(EMAIL));

    // Already signed in: the login page forwards
    let response = send(&state, with_cookie("/login?next=%2Fadmin%2Ftipos", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/tipos");
}

#[tokio::test]
async fn test_offsite_next_is_ignored() {
    let (state, _dir) = setup().await;

    for next in ["//evil.example.com/", "https://evil.example.com/"] {
        let response = send(&state, login_request(EMAIL, PASSWORD, next)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin");
    }
}

#[tokio::test]
async fn test_deactivated_user_loses_access() {
    let (state, _dir) = setup().await;
    let cookie = login(&state).await;

    let user = Users::find()
        .filter(users::Column::Email.eq(EMAIL))
        .one(&state.db)
        .await
        .unwrap()
        .unwrap();
    let mut active: users::ActiveModel = user.into();
    active.active = Set(false);
    active.update(&state.db).await.unwrap();

    let response = send(&state, with_cookie("/admin/tipos", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = send(&state, login_request(EMAIL, PASSWORD, "")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (state, _dir) = setup().await;

    let response = send(
        &state,
        Request::builder().uri("/logout").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("session=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}
