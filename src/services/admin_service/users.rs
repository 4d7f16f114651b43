use crate::api::error::AppError;
use crate::entities::{prelude::*, roles, roles_users, users};
use crate::utils::auth::hash_password;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use validator::Validate;

use super::{AdminService, RoleInput, UserInput};

impl AdminService {
    pub async fn list_roles(&self) -> Result<Vec<roles::Model>, AppError> {
        Ok(Roles::find()
            .order_by_asc(roles::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn create_role(&self, input: RoleInput) -> Result<roles::Model, AppError> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let exists = Roles::find()
            .filter(roles::Column::Name.eq(input.name.as_str()))
            .one(&self.db)
            .await?;
        if exists.is_some() {
            return Err(AppError::BadRequest(format!(
                "Role '{}' already exists",
                input.name
            )));
        }

        Ok(roles::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            ..Default::default()
        }
        .insert(&self.db)
        .await?)
    }

    pub async fn delete_role(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        RolesUsers::delete_many()
            .filter(roles_users::Column::RoleId.eq(id))
            .exec(&txn)
            .await?;
        let res = Roles::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Role {} not found", id)));
        }

        txn.commit().await?;
        Ok(())
    }

    /// Users with the names of the roles they hold.
    pub async fn list_users(&self) -> Result<Vec<(users::Model, Vec<String>)>, AppError> {
        let rows = Users::find()
            .order_by_asc(users::Column::Id)
            .find_with_related(Roles)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(user, roles)| (user, roles.into_iter().map(|r| r.name).collect()))
            .collect())
    }

    pub async fn create_user(&self, input: UserInput) -> Result<(users::Model, Vec<String>), AppError> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let email = input.email.trim().to_lowercase();
        let exists = Users::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await?;
        if exists.is_some() {
            return Err(AppError::BadRequest(format!("User '{}' already exists", email)));
        }

        let mut granted = Vec::new();
        for name in &input.roles {
            let role = Roles::find()
                .filter(roles::Column::Name.eq(name.as_str()))
                .one(&self.db)
                .await?
                .ok_or_else(|| AppError::Validation(format!("Role '{}' does not exist", name)))?;
            granted.push(role);
        }

        let password = hash_password(&input.password)?;

        let txn = self.db.begin().await?;

        let user = users::ActiveModel {
            email: Set(email),
            password: Set(password),
            active: Set(input.active),
            confirmed_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for role in &granted {
            roles_users::ActiveModel {
                user_id: Set(user.id),
                role_id: Set(role.id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        tracing::info!("User {} '{}' created", user.id, user.email);
        Ok((user, granted.into_iter().map(|r| r.name).collect()))
    }

    pub async fn delete_user(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        RolesUsers::delete_many()
            .filter(roles_users::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
        let res = Users::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        txn.commit().await?;
        Ok(())
    }
}
