use crate::api::error::AppError;
use crate::config::ThumbnailSize;
use crate::services::thumbnail_service::{ThumbnailService, split_extension, thumbname};
use crate::utils::validation::validate_image_upload;

use super::{AdminService, ImageChange, ImageInput};

/// Outcome of resolving an [`ImageChange`] before the row is written.
pub(crate) struct ResolvedImage {
    /// Value to store in `path`.
    pub path: Option<String>,
    /// Filename written by this request, removed again if the row write fails.
    pub written: Option<String>,
    /// Previous filename whose artifacts go away once the row is committed.
    pub superseded: Option<String>,
}

impl AdminService {
    /// Validates, thumbnails and persists an uploaded image.
    ///
    /// Returns the stored filename. Either both the original and its thumbnail are
    /// on disk afterwards or neither is.
    pub async fn store_image(&self, input: ImageInput, size: ThumbnailSize) -> Result<String, AppError> {
        let sanitized = validate_image_upload(
            &input.filename,
            &input.data,
            self.config.max_file_size,
            &self.config.allowed_extensions,
        )
        .map_err(AppError::from_upload)?;

        let filename = self.unique_filename(&sanitized).await?;
        let thumb_name = thumbname(&filename);

        let render_name = filename.clone();
        let data = input.data;
        let (data, thumb) = tokio::task::spawn_blocking(move || {
            ThumbnailService::generate_thumbnail(&data, &render_name, size).map(|t| (data, t))
        })
        .await
        .map_err(|e| AppError::Internal(format!("Thumbnail task failed: {}", e)))?
        .map_err(|e| AppError::Validation(format!("Invalid image: {}", e)))?;

        self.storage
            .save_file(&filename, data)
            .await
            .map_err(|e| AppError::Validation(format!("Failed to store image {}: {}", filename, e)))?;

        if let Err(e) = self.storage.save_file(&thumb_name, thumb).await {
            self.cleanup.remove_artifacts(&filename).await;
            return Err(AppError::Validation(format!(
                "Failed to store image {}: {}",
                thumb_name, e
            )));
        }

        tracing::info!(
            "🖼️  Stored image {} with {}x{} thumbnail {}",
            filename,
            size.width,
            size.height,
            thumb_name
        );
        Ok(filename)
    }

    /// Picks a name such that neither it nor its thumbnail collides with an existing file.
    async fn unique_filename(&self, sanitized: &str) -> Result<String, AppError> {
        let (stem, ext) = split_extension(sanitized);
        let mut candidate = sanitized.to_string();

        loop {
            if !self.taken(&candidate).await? {
                return Ok(candidate);
            }
            let suffix = uuid::Uuid::new_v4().simple().to_string();
            candidate = format!("{}-{}{}", stem, &suffix[..8], ext);
        }
    }

    async fn taken(&self, name: &str) -> Result<bool, AppError> {
        let original = self
            .storage
            .file_exists(name)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let thumb = self
            .storage
            .file_exists(&thumbname(name))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(original || thumb)
    }

    pub(crate) async fn resolve_image(
        &self,
        change: ImageChange,
        current: Option<String>,
        size: ThumbnailSize,
    ) -> Result<ResolvedImage, AppError> {
        Ok(match change {
            ImageChange::Keep => ResolvedImage {
                path: current,
                written: None,
                superseded: None,
            },
            ImageChange::Clear => ResolvedImage {
                path: None,
                written: None,
                superseded: current,
            },
            ImageChange::Replace(input) => {
                let stored = self.store_image(input, size).await?;
                ResolvedImage {
                    path: Some(stored.clone()),
                    written: Some(stored),
                    superseded: current,
                }
            }
        })
    }

    /// Completes a row write started with [`resolve_image`](Self::resolve_image).
    pub(crate) async fn settle_image<T>(
        &self,
        resolved: ResolvedImage,
        result: Result<T, AppError>,
    ) -> Result<T, AppError> {
        match result {
            Ok(value) => {
                if let Some(old) = resolved.superseded.filter(|old| Some(old) != resolved.path.as_ref()) {
                    self.cleanup.remove_artifacts(&old).await;
                }
                Ok(value)
            }
            Err(e) => {
                if let Some(written) = resolved.written {
                    self.cleanup.remove_artifacts(&written).await;
                }
                Err(e)
            }
        }
    }
}
