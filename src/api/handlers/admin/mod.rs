pub mod form;
pub mod fotos;
pub mod projetos;
pub mod tipos;
pub mod types;
pub mod users;

use crate::AppState;
use crate::api::error::AppError;
use crate::utils::auth::Claims;
use axum::{Extension, Json, extract::State};

use types::AdminHomeResponse;

#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Signed-in user and entity counts", body = AdminHomeResponse),
        (status = 303, description = "Not signed in, redirected to /login")
    ),
    tag = "admin"
)]
pub async fn home(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<AdminHomeResponse>, AppError> {
    Ok(Json(AdminHomeResponse {
        user: claims.email,
        counts: state.admin.counts().await?,
    }))
}
