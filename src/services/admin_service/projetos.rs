use crate::api::error::AppError;
use crate::entities::{fotos, prelude::*, projetos};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::{AdminService, DeleteOutcome, ProjetoForm, check_len, clean};

impl AdminService {
    pub async fn list_projetos(&self) -> Result<Vec<projetos::Model>, AppError> {
        Ok(Projetos::find()
            .order_by_asc(projetos::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn get_projeto(&self, id: i32) -> Result<projetos::Model, AppError> {
        Projetos::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Projeto {} not found", id)))
    }

    async fn check_tipo(&self, tipo_id: Option<i32>) -> Result<(), AppError> {
        if let Some(id) = tipo_id
            && Tipos::find_by_id(id).one(&self.db).await?.is_none()
        {
            return Err(AppError::Validation(format!("Tipo {} does not exist", id)));
        }
        Ok(())
    }

    fn check_projeto_fields(form: &ProjetoForm) -> Result<(), AppError> {
        check_len("nome", form.nome.as_deref(), 64)?;
        check_len("cliente", form.cliente.as_ref().and_then(|c| c.as_deref()), 64)
    }

    pub async fn create_projeto(&self, form: ProjetoForm) -> Result<projetos::Model, AppError> {
        Self::check_projeto_fields(&form)?;
        let nome = clean(form.nome.clone())
            .ok_or_else(|| AppError::Validation("nome is required".to_string()))?;
        let tipo_id = form.tipo_id.flatten();
        self.check_tipo(tipo_id).await?;

        let resolved = self
            .resolve_image(form.image, None, self.config.projeto_thumbnail)
            .await?;

        let insert = projetos::ActiveModel {
            nome: Set(nome),
            cliente: Set(clean(form.cliente.flatten())),
            path: Set(resolved.path.clone()),
            tipo_id: Set(tipo_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(AppError::from);

        let projeto = self.settle_image(resolved, insert).await?;
        tracing::info!("Projeto {} '{}' created", projeto.id, projeto.nome);
        Ok(projeto)
    }

    pub async fn update_projeto(&self, id: i32, form: ProjetoForm) -> Result<projetos::Model, AppError> {
        Self::check_projeto_fields(&form)?;
        let current = self.get_projeto(id).await?;
        if let Some(tipo_id) = form.tipo_id {
            self.check_tipo(tipo_id).await?;
        }

        let mut active: projetos::ActiveModel = current.clone().into();
        if let Some(nome) = form.nome {
            let nome = clean(Some(nome))
                .ok_or_else(|| AppError::Validation("nome cannot be empty".to_string()))?;
            active.nome = Set(nome);
        }
        if let Some(cliente) = form.cliente {
            active.cliente = Set(clean(cliente));
        }
        if let Some(tipo_id) = form.tipo_id {
            active.tipo_id = Set(tipo_id);
        }

        let resolved = self
            .resolve_image(form.image, current.path, self.config.projeto_thumbnail)
            .await?;
        active.path = Set(resolved.path.clone());

        let update = active.update(&self.db).await.map_err(AppError::from);
        self.settle_image(resolved, update).await
    }

    /// Deletes a Projeto together with its Fotos, then removes every image they owned.
    pub async fn delete_projeto(&self, id: i32) -> Result<DeleteOutcome, AppError> {
        let txn = self.db.begin().await?;

        let projeto = Projetos::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Projeto {} not found", id)))?;

        let owned = Fotos::find()
            .filter(fotos::Column::IdProjeto.eq(id))
            .all(&txn)
            .await?;

        Fotos::delete_many()
            .filter(fotos::Column::IdProjeto.eq(id))
            .exec(&txn)
            .await?;

        Projetos::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            "Projeto {} '{}' deleted with {} foto(s)",
            projeto.id,
            projeto.nome,
            owned.len()
        );

        self.cleanup.after_delete(&projeto).await;
        for foto in &owned {
            self.cleanup.after_delete(foto).await;
        }

        Ok(DeleteOutcome {
            fotos_removed: owned.len(),
        })
    }
}
