use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// An uploaded image as received from the form.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub filename: String,
    pub data: Vec<u8>,
}

/// What an update does to the image field.
#[derive(Debug, Clone, Default)]
pub enum ImageChange {
    #[default]
    Keep,
    Replace(ImageInput),
    Clear,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct TipoInput {
    #[validate(length(min = 1, max = 64, message = "nome must be 1-64 characters"))]
    pub nome: String,
}

/// Projeto form. `None` leaves a field untouched on update; `tipo_id: Some(None)` unsets it.
#[derive(Debug, Clone, Default)]
pub struct ProjetoForm {
    pub nome: Option<String>,
    pub cliente: Option<Option<String>>,
    pub tipo_id: Option<Option<i32>>,
    pub image: ImageChange,
}

/// Foto form, same conventions as [`ProjetoForm`].
#[derive(Debug, Clone, Default)]
pub struct FotoForm {
    pub titulo: Option<Option<String>>,
    pub legenda: Option<Option<String>>,
    pub id_projeto: Option<Option<i32>>,
    pub image: ImageChange,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct RoleInput {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct UserInput {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

fn default_active() -> bool {
    true
}

/// Result of a delete, reporting rows removed alongside the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteOutcome {
    pub fotos_removed: usize,
}

/// Row counts shown on the admin home.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct EntityCounts {
    pub tipos: u64,
    pub projetos: u64,
    pub fotos: u64,
    pub users: u64,
}
