use async_trait::async_trait;
use axum::{http::StatusCode, response::IntoResponse};
use portfolio_backend::AppState;
use portfolio_backend::api::error::AppError;
use portfolio_backend::config::AppConfig;
use portfolio_backend::entities::prelude::*;
use portfolio_backend::infrastructure::database;
use portfolio_backend::services::admin_service::{FotoForm, ImageChange, ImageInput};
use portfolio_backend::services::storage::{LocalStorageService, StorageService};
use sea_orm::{DatabaseConnection, EntityTrait};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Local storage that can be told to fail writes or to drop a foto row mid-upload.
struct FlakyStorageService {
    inner: LocalStorageService,
    fail_saves_containing: Mutex<Option<&'static str>>,
    delete_foto_on_thumb: Mutex<Option<(DatabaseConnection, i32)>>,
}

impl FlakyStorageService {
    fn new(base: &Path) -> Self {
        Self {
            inner: LocalStorageService::new(base),
            fail_saves_containing: Mutex::new(None),
            delete_foto_on_thumb: Mutex::new(None),
        }
    }

    fn fail_saves_containing(&self, pattern: &'static str) {
        *self.fail_saves_containing.lock().unwrap() = Some(pattern);
    }

    fn delete_foto_on_thumb(&self, db: DatabaseConnection, id: i32) {
        *self.delete_foto_on_thumb.lock().unwrap() = Some((db, id));
    }
}

#[async_trait]
impl StorageService for FlakyStorageService {
    async fn save_file(&self, name: &str, data: Vec<u8>) -> anyhow::Result<()> {
        let failing = *self.fail_saves_containing.lock().unwrap();
        if let Some(pattern) = failing
            && name.contains(pattern)
        {
            return Err(anyhow::anyhow!("disk full"));
        }

        if name.contains("_thumb") {
            let pending = self.delete_foto_on_thumb.lock().unwrap().take();
            if let Some((db, id)) = pending {
                Fotos::delete_by_id(id).exec(&db).await?;
            }
        }

        self.inner.save_file(name, data).await
    }

    async fn delete_file(&self, name: &str) -> anyhow::Result<bool> {
        self.inner.delete_file(name).await
    }

    async fn file_exists(&self, name: &str) -> anyhow::Result<bool> {
        self.inner.file_exists(name).await
    }

    fn base_path(&self) -> &Path {
        self.inner.base_path()
    }
}

async fn setup() -> (AppState, Arc<FlakyStorageService>, TempDir) {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::development();
    config.upload_dir = dir.path().to_path_buf();

    let db = database::setup_database(&config).await.unwrap();
    let storage = Arc::new(FlakyStorageService::new(dir.path()));
    let state = AppState::new(db, storage.clone(), config);
    (state, storage, dir)
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([40, 120, 200]));
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

fn foto_form(filename: &str) -> FotoForm {
    FotoForm {
        titulo: Some(Some("Sala".to_string())),
        image: ImageChange::Replace(ImageInput {
            filename: filename.to_string(),
            data: png_bytes(400, 300),
        }),
        ..Default::default()
    }
}

fn files_in(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_original_write_failure_is_a_form_error() {
    let (state, storage, dir) = setup().await;
    storage.fail_saves_containing("a.png");

    let err = state.admin.create_foto(foto_form("a.png")).await.unwrap_err();
    match &err {
        AppError::Validation(msg) => assert!(msg.contains("disk full")),
        other => panic!("expected a validation error, got {:?}", other),
    }
    assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(Fotos::find().all(&state.db).await.unwrap().is_empty());
    assert!(files_in(&dir).is_empty());
}

#[tokio::test]
async fn test_thumbnail_write_failure_removes_original() {
    let (state, storage, dir) = setup().await;
    storage.fail_saves_containing("_thumb");

    let err = state.admin.create_foto(foto_form("a.png")).await.unwrap_err();
    match &err {
        AppError::Validation(msg) => assert!(msg.contains("a_thumb.png")),
        other => panic!("expected a validation error, got {:?}", other),
    }
    assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(Fotos::find().all(&state.db).await.unwrap().is_empty());
    assert!(files_in(&dir).is_empty());
}

#[tokio::test]
async fn test_failed_row_write_removes_new_files() {
    let (state, storage, dir) = setup().await;
    let foto = state.admin.create_foto(foto_form("sala.png")).await.unwrap();
    assert_eq!(files_in(&dir), vec!["sala.png", "sala_thumb.png"]);

    // The row disappears after both new files are on disk, so the update hits nothing
    storage.delete_foto_on_thumb(state.db.clone(), foto.id);
    let result = state.admin.update_foto(foto.id, foto_form("cozinha.png")).await;
    assert!(result.is_err());

    assert_eq!(files_in(&dir), vec!["sala.png", "sala_thumb.png"]);
    assert!(Fotos::find_by_id(foto.id).one(&state.db).await.unwrap().is_none());
}
