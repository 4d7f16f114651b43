use crate::api::error::AppError;
use crate::entities::{fotos, prelude::*};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set, TransactionTrait};

use super::{AdminService, FotoForm, check_len, clean};

impl AdminService {
    pub async fn list_fotos(&self) -> Result<Vec<fotos::Model>, AppError> {
        Ok(Fotos::find()
            .order_by_asc(fotos::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn get_foto(&self, id: i32) -> Result<fotos::Model, AppError> {
        Fotos::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Foto {} not found", id)))
    }

    async fn check_projeto(&self, id_projeto: Option<i32>) -> Result<(), AppError> {
        if let Some(id) = id_projeto
            && Projetos::find_by_id(id).one(&self.db).await?.is_none()
        {
            return Err(AppError::Validation(format!("Projeto {} does not exist", id)));
        }
        Ok(())
    }

    fn check_titulo(form: &FotoForm) -> Result<(), AppError> {
        check_len("titulo", form.titulo.as_ref().and_then(|t| t.as_deref()), 128)
    }

    pub async fn create_foto(&self, form: FotoForm) -> Result<fotos::Model, AppError> {
        Self::check_titulo(&form)?;
        let id_projeto = form.id_projeto.flatten();
        self.check_projeto(id_projeto).await?;

        let resolved = self
            .resolve_image(form.image, None, self.config.foto_thumbnail)
            .await?;

        let insert = fotos::ActiveModel {
            titulo: Set(clean(form.titulo.flatten())),
            legenda: Set(clean(form.legenda.flatten())),
            path: Set(resolved.path.clone()),
            id_projeto: Set(id_projeto),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(AppError::from);

        let foto = self.settle_image(resolved, insert).await?;
        tracing::info!("Foto {} created for projeto {:?}", foto.id, foto.id_projeto);
        Ok(foto)
    }

    pub async fn update_foto(&self, id: i32, form: FotoForm) -> Result<fotos::Model, AppError> {
        Self::check_titulo(&form)?;
        let current = self.get_foto(id).await?;
        if let Some(id_projeto) = form.id_projeto {
            self.check_projeto(id_projeto).await?;
        }

        let mut active: fotos::ActiveModel = current.clone().into();
        if let Some(titulo) = form.titulo {
            active.titulo = Set(clean(titulo));
        }
        if let Some(legenda) = form.legenda {
            active.legenda = Set(clean(legenda));
        }
        if let Some(id_projeto) = form.id_projeto {
            active.id_projeto = Set(id_projeto);
        }

        let resolved = self
            .resolve_image(form.image, current.path, self.config.foto_thumbnail)
            .await?;
        active.path = Set(resolved.path.clone());

        let update = active.update(&self.db).await.map_err(AppError::from);
        self.settle_image(resolved, update).await
    }

    pub async fn delete_foto(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        let foto = Fotos::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Foto {} not found", id)))?;

        Fotos::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!("Foto {} deleted", foto.id);
        self.cleanup.after_delete(&foto).await;
        Ok(())
    }
}
