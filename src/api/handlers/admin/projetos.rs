use crate::AppState;
use crate::api::error::AppError;
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use super::form::AdminMultipart;
use super::types::{DeleteProjetoResponse, ProjetoResponse};

#[utoipa::path(
    get,
    path = "/admin/projetos",
    responses(
        (status = 200, description = "All projetos with thumbnail column", body = [ProjetoResponse])
    ),
    tag = "admin"
)]
pub async fn list_projetos(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjetoResponse>>, AppError> {
    let projetos = state.admin.list_projetos().await?;
    Ok(Json(projetos.into_iter().map(ProjetoResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/admin/projetos/{id}",
    params(("id" = i32, Path, description = "Projeto id")),
    responses(
        (status = 200, description = "Projeto", body = ProjetoResponse),
        (status = 404, description = "Projeto not found")
    ),
    tag = "admin"
)]
pub async fn get_projeto(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProjetoResponse>, AppError> {
    Ok(Json(state.admin.get_projeto(id).await?.into()))
}

#[utoipa::path(
    post,
    path = "/admin/projetos",
    request_body(content = Multipart, description = "Fields nome, cliente, tipo_id and image file `path`"),
    responses(
        (status = 201, description = "Projeto created", body = ProjetoResponse),
        (status = 413, description = "Image too large"),
        (status = 422, description = "Invalid field or image")
    ),
    tag = "admin"
)]
pub async fn create_projeto(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ProjetoResponse>), AppError> {
    let form = AdminMultipart::read(multipart).await?.into_projeto_form()?;
    let projeto = state.admin.create_projeto(form).await?;
    Ok((StatusCode::CREATED, Json(projeto.into())))
}

#[utoipa::path(
    put,
    path = "/admin/projetos/{id}",
    params(("id" = i32, Path, description = "Projeto id")),
    request_body(content = Multipart, description = "Changed fields only; `path_delete=true` clears the image"),
    responses(
        (status = 200, description = "Projeto updated", body = ProjetoResponse),
        (status = 404, description = "Projeto not found"),
        (status = 422, description = "Invalid field or image")
    ),
    tag = "admin"
)]
pub async fn update_projeto(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ProjetoResponse>, AppError> {
    let form = AdminMultipart::read(multipart).await?.into_projeto_form()?;
    Ok(Json(state.admin.update_projeto(id, form).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/admin/projetos/{id}",
    params(("id" = i32, Path, description = "Projeto id")),
    responses(
        (status = 200, description = "Projeto and its fotos deleted", body = DeleteProjetoResponse),
        (status = 404, description = "Projeto not found")
    ),
    tag = "admin"
)]
pub async fn delete_projeto(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteProjetoResponse>, AppError> {
    let outcome = state.admin.delete_projeto(id).await?;
    Ok(Json(DeleteProjetoResponse {
        id,
        fotos_removed: outcome.fotos_removed,
    }))
}
