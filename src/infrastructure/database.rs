use crate::entities::{fotos, projetos, roles, roles_users, tipos, users};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;
use tracing::info;

use crate::config::AppConfig;

pub async fn setup_database(config: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    info!("📂 Database: {}", config.database_url);

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    // Every SQLite in-memory connection is a separate database, and recycling
    // the only one would drop it.
    if config.database_url.contains(":memory:") {
        opt.max_connections(1);
    } else {
        opt.max_connections(20)
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800));
    }

    let db = Database::connect(opt).await?;

    info!("✅ Database connected successfully");

    run_migrations(&db).await?;

    crate::infrastructure::seed::seed_initial_data(&db, config).await?;

    Ok(db)
}

/// Creates every table from its entity definition, parents before children.
pub async fn run_migrations(db: &DatabaseConnection) -> anyhow::Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    info!("🔄 Running auto-migrations...");

    let stmts = vec![
        (
            "tipos",
            schema
                .create_table_from_entity(tipos::Entity)
                .if_not_exists()
                .to_owned(),
        ),
        (
            "projetos",
            schema
                .create_table_from_entity(projetos::Entity)
                .if_not_exists()
                .to_owned(),
        ),
        (
            "fotos",
            schema
                .create_table_from_entity(fotos::Entity)
                .if_not_exists()
                .to_owned(),
        ),
        (
            "roles",
            schema
                .create_table_from_entity(roles::Entity)
                .if_not_exists()
                .to_owned(),
        ),
        (
            "users",
            schema
                .create_table_from_entity(users::Entity)
                .if_not_exists()
                .to_owned(),
        ),
        (
            "roles_users",
            schema
                .create_table_from_entity(roles_users::Entity)
                .if_not_exists()
                .to_owned(),
        ),
    ];

    for (name, stmt) in stmts {
        let stmt = builder.build(&stmt);
        db.execute(stmt).await?;
        info!("   - Table '{}' checked/created", name);
    }

    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_projetos_tipo_id ON projetos(tipo_id)",
        "CREATE INDEX IF NOT EXISTS idx_fotos_id_projeto ON fotos(id_projeto)",
    ];

    for query in indexes {
        if let Err(e) = db
            .execute(sea_orm::Statement::from_string(builder, query.to_owned()))
            .await
        {
            tracing::warn!("   - Index creation warning: {} -> {}", query, e);
        }
    }

    Ok(())
}
