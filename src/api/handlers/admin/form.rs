use crate::api::error::AppError;
use crate::services::admin_service::{FotoForm, ImageChange, ImageInput, ProjetoForm};
use axum::extract::Multipart;
use std::collections::HashMap;

/// Name of the image field on Projeto and Foto forms.
pub const IMAGE_FIELD: &str = "path";
/// Checkbox that clears the stored image.
pub const IMAGE_DELETE_FIELD: &str = "path_delete";

/// A parsed multipart admin form: text fields plus the optional image part.
#[derive(Debug, Default)]
pub struct AdminMultipart {
    fields: HashMap<String, String>,
    image: Option<ImageInput>,
}

impl AdminMultipart {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("length limit exceeded") {
                AppError::PayloadTooLarge(
                    "Request body exceeds the maximum allowed limit".to_string(),
                )
            } else {
                AppError::BadRequest(err_msg)
            }
        })? {
            let name = field.name().unwrap_or_default().to_string();

            if name == IMAGE_FIELD {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // Browsers send an empty part when no file was chosen.
                if filename.is_empty() && data.is_empty() {
                    continue;
                }
                form.image = Some(ImageInput {
                    filename,
                    data: data.to_vec(),
                });
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    /// Present-but-blank text means "set to NULL".
    fn nullable_text(&self, name: &str) -> Option<Option<String>> {
        self.fields
            .get(name)
            .map(|v| Some(v.trim().to_string()).filter(|v| !v.is_empty()))
    }

    fn nullable_id(&self, name: &str) -> Result<Option<Option<i32>>, AppError> {
        match self.fields.get(name).map(|v| v.trim()) {
            None => Ok(None),
            Some("") => Ok(Some(None)),
            Some(v) => v
                .parse::<i32>()
                .map(|id| Some(Some(id)))
                .map_err(|_| AppError::Validation(format!("{} must be an integer", name))),
        }
    }

    fn flag(&self, name: &str) -> bool {
        matches!(
            self.fields.get(name).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("true" | "1" | "on" | "y" | "yes")
        )
    }

    fn image_change(&mut self) -> ImageChange {
        match self.image.take() {
            Some(input) => ImageChange::Replace(input),
            None if self.flag(IMAGE_DELETE_FIELD) => ImageChange::Clear,
            None => ImageChange::Keep,
        }
    }

    pub fn into_projeto_form(mut self) -> Result<ProjetoForm, AppError> {
        Ok(ProjetoForm {
            nome: self.text("nome"),
            cliente: self.nullable_text("cliente"),
            tipo_id: self.nullable_id("tipo_id")?,
            image: self.image_change(),
        })
    }

    pub fn into_foto_form(mut self) -> Result<FotoForm, AppError> {
        Ok(FotoForm {
            titulo: self.nullable_text("titulo"),
            legenda: self.nullable_text("legenda"),
            id_projeto: self.nullable_id("id_projeto")?,
            image: self.image_change(),
        })
    }
}
