use crate::AppState;
use crate::api::error::AppError;
use crate::services::admin_service::{RoleInput, UserInput};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::types::{RoleResponse, UserResponse};

#[utoipa::path(
    get,
    path = "/admin/roles",
    responses((status = 200, description = "All roles", body = [RoleResponse])),
    tag = "admin"
)]
pub async fn list_roles(State(state): State<AppState>) -> Result<Json<Vec<RoleResponse>>, AppError> {
    let roles = state.admin.list_roles().await?;
    Ok(Json(roles.into_iter().map(RoleResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/admin/roles",
    request_body = RoleInput,
    responses(
        (status = 201, description = "Role created", body = RoleResponse),
        (status = 400, description = "Role already exists")
    ),
    tag = "admin"
)]
pub async fn create_role(
    State(state): State<AppState>,
    Json(input): Json<RoleInput>,
) -> Result<(StatusCode, Json<RoleResponse>), AppError> {
    let role = state.admin.create_role(input).await?;
    Ok((StatusCode::CREATED, Json(role.into())))
}

#[utoipa::path(
    delete,
    path = "/admin/roles/{id}",
    params(("id" = i32, Path, description = "Role id")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 404, description = "Role not found")
    ),
    tag = "admin"
)]
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.admin.delete_role(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/admin/users",
    responses((status = 200, description = "All users with their roles", body = [UserResponse])),
    tag = "admin"
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.admin.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/admin/users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "User already exists"),
        (status = 422, description = "Invalid email, password or role")
    ),
    tag = "admin"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state.admin.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    ),
    tag = "admin"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.admin.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
