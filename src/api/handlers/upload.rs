use crate::api::error::AppError;
use crate::api::views;
use axum::{Json, extract::Multipart, response::Html};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct UploadStubResponse {
    pub status: String,
    pub received: usize,
    pub files: Vec<String>,
}

pub async fn upload_form() -> Html<String> {
    Html(views::upload_page())
}

/// Accepts a multi-file form and acknowledges it. Nothing is persisted.
#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = Multipart, description = "Files in the `file[]` field"),
    responses(
        (status = 200, description = "Upload acknowledged", body = UploadStubResponse)
    ),
    tag = "upload"
)]
pub async fn upload_stub(mut multipart: Multipart) -> Result<Json<UploadStubResponse>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name != "file[]" && name != "file" {
            continue;
        }
        let filename = field.file_name().unwrap_or("unnamed").to_string();
        // Drain the part so the stream advances.
        field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        files.push(filename);
    }

    tracing::info!("📥 Upload stub received {} file(s)", files.len());

    Ok(Json(UploadStubResponse {
        status: "success".to_string(),
        received: files.len(),
        files,
    }))
}
