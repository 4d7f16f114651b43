use crate::AppState;
use crate::api::error::AppError;
use crate::api::views;
use crate::services::catalog_service::TipoLookup;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// `GET /`: type navigation.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let tipos = state.catalog.list_types().await?;
    Ok(Html(views::index_page(&tipos)))
}

/// `GET /projetos/:tipo`: projects of one type.
///
/// An unknown slug is a 404; a known type with no projects renders the index page.
pub async fn projetos(
    State(state): State<AppState>,
    Path(tipo): Path<String>,
) -> Result<Response, AppError> {
    let tipos = state.catalog.list_types().await?;

    let tipo_id = match state.catalog.resolve_tipo(&tipo).await? {
        TipoLookup::Id(id) => id,
        TipoLookup::Unknown => {
            tracing::debug!("Unknown tipo slug requested: {}", tipo);
            return Ok((
                StatusCode::NOT_FOUND,
                Html(views::not_found_page(&tipos, &tipo)),
            )
                .into_response());
        }
    };

    let entries = state.catalog.list_projects_by_type(tipo_id).await?;
    if entries.is_empty() {
        return Ok(Html(views::index_page(&tipos)).into_response());
    }

    Ok(Html(views::projetos_page(&tipos, &entries)).into_response())
}
