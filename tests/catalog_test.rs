use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use portfolio_backend::config::AppConfig;
use portfolio_backend::entities::*;
use portfolio_backend::infrastructure::database;
use portfolio_backend::services::storage::LocalStorageService;
use portfolio_backend::{AppState, create_app};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

async fn setup() -> (AppState, TempDir) {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::development();
    config.upload_dir = dir.path().to_path_buf();

    let db = database::setup_database(&config).await.unwrap();
    let storage = Arc::new(LocalStorageService::new(dir.path()));
    (AppState::new(db, storage, config), dir)
}

async fn tipo(db: &DatabaseConnection, nome: &str) -> tipos::Model {
    tipos::ActiveModel {
        nome: Set(nome.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

async fn projeto(
    db: &DatabaseConnection,
    nome: &str,
    tipo_id: Option<i32>,
    path: Option<&str>,
) -> projetos::Model {
    projetos::ActiveModel {
        nome: Set(nome.to_string()),
        cliente: Set(Some("Família Souza".to_string())),
        path: Set(path.map(str::to_string)),
        tipo_id: Set(tipo_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

async fn foto(db: &DatabaseConnection, titulo: &str, id_projeto: i32, path: &str) -> fotos::Model {
    fotos::ActiveModel {
        titulo: Set(Some(titulo.to_string())),
        legenda: Set(None),
        path: Set(Some(path.to_string())),
        id_projeto: Set(Some(id_projeto)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, String) {
    let app = create_app(state.clone());
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_lists_lowercased_types() {
    let (state, _dir) = setup().await;
    let residencial = tipo(&state.db, "Residencial").await;
    let comercial = tipo(&state.db, "Comercial").await;

    let (status, body) = get(&state, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&format!(
        "<a href=\"/projetos/{}\">residencial</a>",
        residencial.id
    )));
    assert!(body.contains(&format!(
        "<a href=\"/projetos/{}\">comercial</a>",
        comercial.id
    )));
    assert!(!body.contains("Residencial"));
}

#[tokio::test]
async fn test_projects_by_type() {
    let (state, _dir) = setup().await;
    let residencial = tipo(&state.db, "Residencial").await;
    let comercial = tipo(&state.db, "Comercial").await;

    let casa = projeto(&state.db, "Casa A", Some(residencial.id), Some("casa.jpg")).await;
    foto(&state.db, "Sala", casa.id, "sala.jpg").await;
    foto(&state.db, "Cozinha", casa.id, "cozinha.jpg").await;
    projeto(&state.db, "Loja B", Some(comercial.id), None).await;

    let (status, body) = get(&state, &format!("/projetos/{}", residencial.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Casa A"));
    assert!(body.contains("Família Souza"));
    assert!(body.contains("/static/files/casa_thumb.jpg"));
    assert!(body.contains("/static/files/sala_thumb.jpg"));
    assert!(body.contains("/static/files/cozinha_thumb.jpg"));
    assert!(!body.contains("Loja B"));

    // Fotos keep insertion order
    let sala = body.find("Sala").unwrap();
    let cozinha = body.find("Cozinha").unwrap();
    assert!(sala < cozinha);

    // Slug lookup is case-insensitive against the type name
    let (status, by_slug) = get(&state, "/projetos/Residencial").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_slug, body);
}

#[tokio::test]
async fn test_empty_type_falls_back_to_index() {
    let (state, _dir) = setup().await;
    let residencial = tipo(&state.db, "Residencial").await;
    let interiores = tipo(&state.db, "Interiores").await;
    projeto(&state.db, "Casa A", Some(residencial.id), None).await;

    let (_, index) = get(&state, "/").await;

    let (status, body) = get(&state, &format!("/projetos/{}", interiores.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, index);

    let (status, body) = get(&state, "/projetos/interiores").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, index);

    // Numeric ids are not checked for existence
    let (status, body) = get(&state, "/projetos/999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, index);
}

#[tokio::test]
async fn test_unknown_slug_is_not_found() {
    let (state, _dir) = setup().await;
    tipo(&state.db, "Residencial").await;

    let (status, body) = get(&state, "/projetos/industrial").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("industrial"));
}

#[tokio::test]
async fn test_catalog_escapes_names() {
    let (state, _dir) = setup().await;
    let t = tipo(&state.db, "Residencial").await;
    projeto(&state.db, "<script>alert(1)</script>", Some(t.id), None).await;

    let (_, body) = get(&state, &format!("/projetos/{}", t.id)).await;
    assert!(!body.contains("<script>"));
    assert!(body.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test_upload_stub_counts_files() {
    let (state, dir) = setup().await;
    let boundary = "stub-boundary";
    let mut body = String::new();
    for name in ["a.jpg", "b.png"] {
        body.push_str(&format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file[]\"; filename=\"{n}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\ncontent of {n}\r\n",
            b = boundary,
            n = name
        ));
    }
    body.push_str(&format!("--{}--\r\n", boundary));

    let app = create_app(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["received"], 2);
    assert_eq!(json["files"], serde_json::json!(["a.jpg", "b.png"]));

    // Nothing persisted
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

    let (status, form) = get(&state, "/upload").await;
    assert_eq!(status, StatusCode::OK);
    assert!(form.contains("name=\"file[]\""));
}

#[tokio::test]
async fn test_health_check() {
    let (state, _dir) = setup().await;

    let (status, body) = get(&state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "connected");
    assert_eq!(json["upload_dir"], "available");
}
