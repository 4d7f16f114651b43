use crate::config::AppConfig;
use crate::services::cleanup::ArtifactCleanup;
use crate::services::storage::StorageService;
use crate::api::error::AppError;
use crate::entities::prelude::*;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use std::sync::Arc;

pub mod fotos;
pub mod projetos;
pub mod tipos;
pub mod types;
pub mod upload;
pub mod users;

pub use types::*;

/// Write side of the catalog: CRUD for every entity, image uploads included.
///
/// Deletes commit first and then hand the removed rows to [`ArtifactCleanup`].
pub struct AdminService {
    db: DatabaseConnection,
    storage: Arc<dyn StorageService>,
    cleanup: ArtifactCleanup,
    config: AppConfig,
}

impl AdminService {
    pub fn new(db: DatabaseConnection, storage: Arc<dyn StorageService>, config: AppConfig) -> Self {
        Self {
            cleanup: ArtifactCleanup::new(storage.clone()),
            db,
            storage,
            config,
        }
    }

    pub async fn counts(&self) -> Result<EntityCounts, AppError> {
        Ok(EntityCounts {
            tipos: Tipos::find().count(&self.db).await?,
            projetos: Projetos::find().count(&self.db).await?,
            fotos: Fotos::find().count(&self.db).await?,
            users: Users::find().count(&self.db).await?,
        })
    }
}

pub(super) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(super) fn check_len(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}
