use crate::api::views::{list_thumbnail, thumbnail_url};
use crate::entities::{fotos, projetos, roles, tipos, users};
use crate::services::admin_service::EntityCounts;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct AdminHomeResponse {
    pub user: String,
    pub counts: EntityCounts,
}

#[derive(Serialize, ToSchema)]
pub struct TipoResponse {
    pub id: i32,
    pub nome: String,
}

impl From<tipos::Model> for TipoResponse {
    fn from(m: tipos::Model) -> Self {
        Self {
            id: m.id,
            nome: m.nome,
        }
    }
}

fn thumbnail_columns(path: Option<&str>) -> (String, Option<String>) {
    (
        list_thumbnail(path),
        path.filter(|p| !p.is_empty()).map(thumbnail_url),
    )
}

#[derive(Serialize, ToSchema)]
pub struct ProjetoResponse {
    pub id: i32,
    pub nome: String,
    pub cliente: Option<String>,
    pub tipo_id: Option<i32>,
    pub path: Option<String>,
    /// `<img>` markup pointing at the thumbnail, empty without an image.
    pub thumbnail: String,
    pub thumbnail_url: Option<String>,
}

impl From<projetos::Model> for ProjetoResponse {
    fn from(m: projetos::Model) -> Self {
        let (thumbnail, thumbnail_url) = thumbnail_columns(m.path.as_deref());
        Self {
            id: m.id,
            nome: m.nome,
            cliente: m.cliente,
            tipo_id: m.tipo_id,
            path: m.path,
            thumbnail,
            thumbnail_url,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct FotoResponse {
    pub id: i32,
    pub titulo: Option<String>,
    pub legenda: Option<String>,
    pub path: Option<String>,
    pub id_projeto: Option<i32>,
    pub thumbnail: String,
    pub thumbnail_url: Option<String>,
}

impl From<fotos::Model> for FotoResponse {
    fn from(m: fotos::Model) -> Self {
        let (thumbnail, thumbnail_url) = thumbnail_columns(m.path.as_deref());
        Self {
            id: m.id,
            titulo: m.titulo,
            legenda: m.legenda,
            path: m.path,
            id_projeto: m.id_projeto,
            thumbnail,
            thumbnail_url,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DeleteProjetoResponse {
    pub id: i32,
    pub fotos_removed: usize,
}

#[derive(Serialize, ToSchema)]
pub struct RoleResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<roles::Model> for RoleResponse {
    fn from(m: roles::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub active: bool,
    pub confirmed_at: Option<chrono::DateTime<Utc>>,
    pub roles: Vec<String>,
}

impl From<(users::Model, Vec<String>)> for UserResponse {
    fn from((m, roles): (users::Model, Vec<String>)) -> Self {
        Self {
            id: m.id,
            email: m.email,
            active: m.active,
            confirmed_at: m.confirmed_at,
            roles,
        }
    }
}
