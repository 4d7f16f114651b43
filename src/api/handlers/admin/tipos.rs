use crate::AppState;
use crate::api::error::AppError;
use crate::services::admin_service::TipoInput;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::types::TipoResponse;

#[utoipa::path(
    get,
    path = "/admin/tipos",
    responses(
        (status = 200, description = "All tipos", body = [TipoResponse]),
        (status = 303, description = "Not signed in")
    ),
    tag = "admin"
)]
pub async fn list_tipos(State(state): State<AppState>) -> Result<Json<Vec<TipoResponse>>, AppError> {
    let tipos = state.admin.list_tipos().await?;
    Ok(Json(tipos.into_iter().map(TipoResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/admin/tipos/{id}",
    params(("id" = i32, Path, description = "Tipo id")),
    responses(
        (status = 200, description = "Tipo", body = TipoResponse),
        (status = 404, description = "Tipo not found")
    ),
    tag = "admin"
)]
pub async fn get_tipo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TipoResponse>, AppError> {
    Ok(Json(state.admin.get_tipo(id).await?.into()))
}

#[utoipa::path(
    post,
    path = "/admin/tipos",
    request_body = TipoInput,
    responses(
        (status = 201, description = "Tipo created", body = TipoResponse),
        (status = 422, description = "Invalid nome")
    ),
    tag = "admin"
)]
pub async fn create_tipo(
    State(state): State<AppState>,
    Json(input): Json<TipoInput>,
) -> Result<(StatusCode, Json<TipoResponse>), AppError> {
    let tipo = state.admin.create_tipo(input).await?;
    Ok((StatusCode::CREATED, Json(tipo.into())))
}

#[utoipa::path(
    put,
    path = "/admin/tipos/{id}",
    params(("id" = i32, Path, description = "Tipo id")),
    request_body = TipoInput,
    responses(
        (status = 200, description = "Tipo updated", body = TipoResponse),
        (status = 404, description = "Tipo not found")
    ),
    tag = "admin"
)]
pub async fn update_tipo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<TipoInput>,
) -> Result<Json<TipoResponse>, AppError> {
    Ok(Json(state.admin.update_tipo(id, input).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/admin/tipos/{id}",
    params(("id" = i32, Path, description = "Tipo id")),
    responses(
        (status = 204, description = "Tipo deleted, its projetos keep no tipo"),
        (status = 404, description = "Tipo not found")
    ),
    tag = "admin"
)]
pub async fn delete_tipo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.admin.delete_tipo(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
