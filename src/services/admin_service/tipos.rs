use crate::api::error::AppError;
use crate::entities::{prelude::*, projetos, tipos};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::Expr,
};
use validator::Validate;

use super::{AdminService, TipoInput};

impl AdminService {
    pub async fn list_tipos(&self) -> Result<Vec<tipos::Model>, AppError> {
        Ok(Tipos::find()
            .order_by_asc(tipos::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn get_tipo(&self, id: i32) -> Result<tipos::Model, AppError> {
        Tipos::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tipo {} not found", id)))
    }

    pub async fn create_tipo(&self, input: TipoInput) -> Result<tipos::Model, AppError> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let tipo = tipos::ActiveModel {
            nome: Set(input.nome.trim().to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!("Tipo {} '{}' created", tipo.id, tipo.nome);
        Ok(tipo)
    }

    pub async fn update_tipo(&self, id: i32, input: TipoInput) -> Result<tipos::Model, AppError> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut active: tipos::ActiveModel = self.get_tipo(id).await?.into();
        active.nome = Set(input.nome.trim().to_string());
        Ok(active.update(&self.db).await?)
    }

    /// Deletes a Tipo; its projects stay in the catalog without a type.
    pub async fn delete_tipo(&self, id: i32) -> Result<(), AppError> {
        let tipo = self.get_tipo(id).await?;

        let txn = self.db.begin().await?;

        let detached = Projetos::update_many()
            .col_expr(projetos::Column::TipoId, Expr::value(Option::<i32>::None))
            .filter(projetos::Column::TipoId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        Tipos::delete_by_id(tipo.id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            "Tipo {} '{}' deleted, {} projeto(s) detached",
            tipo.id,
            tipo.nome,
            detached
        );
        Ok(())
    }
}
