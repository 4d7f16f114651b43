use crate::AppState;
use crate::api::error::AppError;
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use super::form::AdminMultipart;
use super::types::FotoResponse;

#[utoipa::path(
    get,
    path = "/admin/fotos",
    responses(
        (status = 200, description = "All fotos with thumbnail column", body = [FotoResponse])
    ),
    tag = "admin"
)]
pub async fn list_fotos(State(state): State<AppState>) -> Result<Json<Vec<FotoResponse>>, AppError> {
    let fotos = state.admin.list_fotos().await?;
    Ok(Json(fotos.into_iter().map(FotoResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/admin/fotos/{id}",
    params(("id" = i32, Path, description = "Foto id")),
    responses(
        (status = 200, description = "Foto", body = FotoResponse),
        (status = 404, description = "Foto not found")
    ),
    tag = "admin"
)]
pub async fn get_foto(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FotoResponse>, AppError> {
    Ok(Json(state.admin.get_foto(id).await?.into()))
}

#[utoipa::path(
    post,
    path = "/admin/fotos",
    request_body(content = Multipart, description = "Fields titulo, legenda, id_projeto and image file `path`"),
    responses(
        (status = 201, description = "Foto created", body = FotoResponse),
        (status = 413, description = "Image too large"),
        (status = 422, description = "Invalid field or image")
    ),
    tag = "admin"
)]
pub async fn create_foto(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<FotoResponse>), AppError> {
    let form = AdminMultipart::read(multipart).await?.into_foto_form()?;
    let foto = state.admin.create_foto(form).await?;
    Ok((StatusCode::CREATED, Json(foto.into())))
}

#[utoipa::path(
    put,
    path = "/admin/fotos/{id}",
    params(("id" = i32, Path, description = "Foto id")),
    request_body(content = Multipart, description = "Changed fields only; `path_delete=true` clears the image"),
    responses(
        (status = 200, description = "Foto updated", body = FotoResponse),
        (status = 404, description = "Foto not found"),
        (status = 422, description = "Invalid field or image")
    ),
    tag = "admin"
)]
pub async fn update_foto(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<FotoResponse>, AppError> {
    let form = AdminMultipart::read(multipart).await?.into_foto_form()?;
    Ok(Json(state.admin.update_foto(id, form).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/admin/fotos/{id}",
    params(("id" = i32, Path, description = "Foto id")),
    responses(
        (status = 204, description = "Foto deleted along with its image files"),
        (status = 404, description = "Foto not found")
    ),
    tag = "admin"
)]
pub async fn delete_foto(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.admin.delete_foto(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
