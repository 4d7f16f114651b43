pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::admin_service::AdminService;
use crate::services::catalog_service::CatalogService;
use crate::services::storage::{STATIC_FILES_URL, StorageService};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::get,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::health::health_check,
        api::handlers::upload::upload_stub,
        api::handlers::admin::home,
        api::handlers::admin::tipos::list_tipos,
        api::handlers::admin::tipos::get_tipo,
        api::handlers::admin::tipos::create_tipo,
        api::handlers::admin::tipos::update_tipo,
        api::handlers::admin::tipos::delete_tipo,
        api::handlers::admin::projetos::list_projetos,
        api::handlers::admin::projetos::get_projeto,
        api::handlers::admin::projetos::create_projeto,
        api::handlers::admin::projetos::update_projeto,
        api::handlers::admin::projetos::delete_projeto,
        api::handlers::admin::fotos::list_fotos,
        api::handlers::admin::fotos::get_foto,
        api::handlers::admin::fotos::create_foto,
        api::handlers::admin::fotos::update_foto,
        api::handlers::admin::fotos::delete_foto,
        api::handlers::admin::users::list_roles,
        api::handlers::admin::users::create_role,
        api::handlers::admin::users::delete_role,
        api::handlers::admin::users::list_users,
        api::handlers::admin::users::create_user,
        api::handlers::admin::users::delete_user,
    ),
    components(
        schemas(
            api::handlers::health::HealthResponse,
            api::handlers::upload::UploadStubResponse,
            api::handlers::admin::types::AdminHomeResponse,
            api::handlers::admin::types::TipoResponse,
            api::handlers::admin::types::ProjetoResponse,
            api::handlers::admin::types::FotoResponse,
            api::handlers::admin::types::DeleteProjetoResponse,
            api::handlers::admin::types::RoleResponse,
            api::handlers::admin::types::UserResponse,
            services::admin_service::EntityCounts,
            services::admin_service::TipoInput,
            services::admin_service::RoleInput,
            services::admin_service::UserInput,
        )
    ),
    tags(
        (name = "admin", description = "Catalog administration, requires a session"),
        (name = "upload", description = "Multi-file upload stub"),
        (name = "system", description = "Health")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: Arc<dyn StorageService>,
    pub catalog: CatalogService,
    pub admin: Arc<AdminService>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, storage: Arc<dyn StorageService>, config: AppConfig) -> Self {
        Self {
            catalog: CatalogService::new(db.clone()),
            admin: Arc::new(AdminService::new(db.clone(), storage.clone(), config.clone())),
            db,
            storage,
            config,
        }
    }
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    use api::handlers::admin;

    Router::new()
        .route("/admin", get(admin::home))
        .route(
            "/admin/tipos",
            get(admin::tipos::list_tipos).post(admin::tipos::create_tipo),
        )
        .route(
            "/admin/tipos/:id",
            get(admin::tipos::get_tipo)
                .put(admin::tipos::update_tipo)
                .delete(admin::tipos::delete_tipo),
        )
        .route(
            "/admin/projetos",
            get(admin::projetos::list_projetos).post(admin::projetos::create_projeto),
        )
        .route(
            "/admin/projetos/:id",
            get(admin::projetos::get_projeto)
                .put(admin::projetos::update_projeto)
                .delete(admin::projetos::delete_projeto),
        )
        .route(
            "/admin/fotos",
            get(admin::fotos::list_fotos).post(admin::fotos::create_foto),
        )
        .route(
            "/admin/fotos/:id",
            get(admin::fotos::get_foto)
                .put(admin::fotos::update_foto)
                .delete(admin::fotos::delete_foto),
        )
        .route(
            "/admin/roles",
            get(admin::users::list_roles).post(admin::users::create_role),
        )
        .route(
            "/admin/roles/:id",
            axum::routing::delete(admin::users::delete_role),
        )
        .route(
            "/admin/users",
            get(admin::users::list_users).post(admin::users::create_user),
        )
        .route(
            "/admin/users/:id",
            axum::routing::delete(admin::users::delete_user),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            api::middleware::auth::auth_middleware,
        ))
}

pub fn create_app(state: AppState) -> Router {
    let static_files = ServeDir::new(state.storage.base_path());

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route("/", get(api::handlers::catalog::index))
        .route("/projetos/:tipo", get(api::handlers::catalog::projetos))
        .route(
            "/upload",
            get(api::handlers::upload::upload_form).post(api::handlers::upload::upload_stub),
        )
        .route(
            "/login",
            get(api::handlers::auth::login_form).post(api::handlers::auth::login),
        )
        .route("/logout", get(api::handlers::auth::logout))
        .merge(admin_routes(&state))
        .nest_service(STATIC_FILES_URL, static_files)
        .layer(axum::extract::DefaultBodyLimit::max(
            state.config.max_file_size + 10 * 1024 * 1024, // multipart overhead
        ))
        .with_state(state)
}
