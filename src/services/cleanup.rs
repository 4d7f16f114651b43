use std::sync::Arc;

use crate::entities::{fotos, projetos};
use crate::services::storage::StorageService;
use crate::services::thumbnail_service::thumbname;

/// A row whose lifecycle owns an uploaded image and its thumbnail.
pub trait ImageBearing {
    fn image_path(&self) -> Option<&str>;
}

impl ImageBearing for projetos::Model {
    fn image_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

impl ImageBearing for fotos::Model {
    fn image_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

/// Removes the on-disk artifacts of deleted rows.
///
/// Never fails: a missing file is a no-op and any other I/O error is only logged,
/// so the caller's delete has already been committed by the time this runs.
#[derive(Clone)]
pub struct ArtifactCleanup {
    storage: Arc<dyn StorageService>,
}

impl ArtifactCleanup {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        Self { storage }
    }

    pub async fn after_delete<T: ImageBearing + ?Sized>(&self, row: &T) {
        if let Some(path) = row.image_path() {
            self.remove_artifacts(path).await;
        }
    }

    /// Removes `path` and `thumbname(path)` from the upload directory.
    pub async fn remove_artifacts(&self, path: &str) {
        for name in [path.to_string(), thumbname(path)] {
            match self.storage.delete_file(&name).await {
                Ok(true) => tracing::info!("🗑️  Removed artifact {}", name),
                Ok(false) => tracing::debug!("Artifact {} already absent", name),
                Err(e) => tracing::warn!("Failed to remove artifact {}: {}", name, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::LocalStorageService;

    fn projeto(path: Option<&str>) -> projetos::Model {
        projetos::Model {
            id: 1,
            nome: "Casa A".to_string(),
            cliente: None,
            path: path.map(str::to_string),
            tipo_id: None,
        }
    }

    #[tokio::test]
    async fn test_after_delete_removes_original_and_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorageService::new(dir.path()));
        storage.save_file("a.jpg", vec![1]).await.unwrap();
        storage.save_file("a_thumb.jpg", vec![2]).await.unwrap();
        storage.save_file("b.jpg", vec![3]).await.unwrap();

        let cleanup = ArtifactCleanup::new(storage.clone());
        cleanup.after_delete(&projeto(Some("a.jpg"))).await;

        assert!(!dir.path().join("a.jpg").exists());
        assert!(!dir.path().join("a_thumb.jpg").exists());
        assert!(dir.path().join("b.jpg").exists());
    }

    #[tokio::test]
    async fn test_after_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorageService::new(dir.path()));
        storage.save_file("a_thumb.jpg", vec![2]).await.unwrap();

        let cleanup = ArtifactCleanup::new(storage);
        let row = projeto(Some("a.jpg"));
        cleanup.after_delete(&row).await;
        cleanup.after_delete(&row).await;

        assert!(!dir.path().join("a.jpg").exists());
        assert!(!dir.path().join("a_thumb.jpg").exists());
    }

    #[tokio::test]
    async fn test_null_path_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorageService::new(dir.path()));
        storage.save_file("_thumb", vec![1]).await.unwrap();

        let cleanup = ArtifactCleanup::new(storage);
        cleanup.after_delete(&projeto(None)).await;
        cleanup.after_delete(&projeto(Some(""))).await;

        assert!(dir.path().join("_thumb").exists());
    }
}
