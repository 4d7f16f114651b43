use crate::config::AppConfig;
use crate::entities::{prelude::*, roles, roles_users, tipos, users};
use crate::utils::auth::hash_password;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tracing::info;

pub const ADMIN_ROLE: &str = "admin";

/// Tipos created by `--sample-data` on an empty catalog.
const SAMPLE_TIPOS: [&str; 3] = ["Residencial", "Comercial", "Interiores"];

pub async fn seed_initial_data(db: &DatabaseConnection, config: &AppConfig) -> anyhow::Result<()> {
    info!("🌱 Seeding initial data...");

    let admin_role = ensure_role(db, ADMIN_ROLE, Some("Catalog administrator")).await?;

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        let email = email.trim().to_lowercase();
        let existing = Users::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(db)
            .await?;

        if existing.is_none() {
            let user = users::ActiveModel {
                email: Set(email.clone()),
                password: Set(hash_password(password)?),
                active: Set(true),
                confirmed_at: Set(Some(Utc::now())),
                ..Default::default()
            }
            .insert(db)
            .await?;

            roles_users::ActiveModel {
                user_id: Set(user.id),
                role_id: Set(admin_role.id),
            }
            .insert(db)
            .await?;

            info!("   - Admin user '{}' created", email);
        }
    }

    Ok(())
}

pub async fn ensure_role(
    db: &DatabaseConnection,
    name: &str,
    description: Option<&str>,
) -> anyhow::Result<roles::Model> {
    if let Some(role) = Roles::find()
        .filter(roles::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok(role);
    }

    let role = roles::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.map(str::to_string)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("   - Role '{}' created", name);
    Ok(role)
}

pub async fn seed_sample_data(db: &DatabaseConnection) -> anyhow::Result<()> {
    if Tipos::find().count(db).await? > 0 {
        info!("🌱 Catalog already has tipos, skipping sample data");
        return Ok(());
    }

    for nome in SAMPLE_TIPOS {
        tipos::ActiveModel {
            nome: Set(nome.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    info!("🌱 Sample tipos created: {}", SAMPLE_TIPOS.join(", "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_db() -> DatabaseConnection {
        crate::infrastructure::database::setup_database(&crate::config::AppConfig::development())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_seed_creates_admin_once() {
        let db = setup_db().await;
        let config = AppConfig {
            admin_email: Some("admin@example.com".to_string()),
            admin_password: Some("password123".to_string()),
            ..AppConfig::development()
        };

        seed_initial_data(&db, &config).await.unwrap();
        seed_initial_data(&db, &config).await.unwrap();

        assert_eq!(Users::find().count(&db).await.unwrap(), 1);
        assert_eq!(Roles::find().count(&db).await.unwrap(), 1);
        assert_eq!(RolesUsers::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sample_data_only_on_empty_catalog() {
        let db = setup_db().await;
        seed_sample_data(&db).await.unwrap();
        seed_sample_data(&db).await.unwrap();
        assert_eq!(Tipos::find().count(&db).await.unwrap(), 3);
    }
}
