use crate::entities::{fotos, prelude::*, projetos, tipos};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

/// Navigation entry for a Tipo, with the name lowercased for display and URL matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TipoLink {
    pub id: i32,
    pub nome: String,
}

/// A project as shown in the public catalog.
#[derive(Debug, Clone, Serialize)]
pub struct ProjetoEntry {
    pub projeto: projetos::Model,
    pub tipo: Option<tipos::Model>,
    pub fotos: Vec<fotos::Model>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoLookup {
    Id(i32),
    Unknown,
}

/// Read side of the public catalog.
#[derive(Clone)]
pub struct CatalogService {
    db: DatabaseConnection,
}

impl CatalogService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every Tipo in table order.
    pub async fn list_types(&self) -> Result<Vec<TipoLink>, DbErr> {
        let tipos = Tipos::find()
            .order_by_asc(tipos::Column::Id)
            .all(&self.db)
            .await?;

        Ok(tipos
            .into_iter()
            .map(|t| TipoLink {
                id: t.id,
                nome: t.nome.to_lowercase(),
            })
            .collect())
    }

    /// Projects whose `tipo_id` is `tipo_id`, each with its Tipo and Fotos resolved.
    pub async fn list_projects_by_type(&self, tipo_id: i32) -> Result<Vec<ProjetoEntry>, DbErr> {
        let rows = Projetos::find()
            .filter(projetos::Column::TipoId.eq(tipo_id))
            .order_by_asc(projetos::Column::Id)
            .find_with_related(Fotos)
            .all(&self.db)
            .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let tipo = Tipos::find_by_id(tipo_id).one(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|(projeto, mut fotos)| {
                fotos.sort_by_key(|f| f.id);
                ProjetoEntry {
                    projeto,
                    tipo: tipo.clone(),
                    fotos,
                }
            })
            .collect())
    }

    /// Resolves the `/projetos/{tipo}` path segment.
    ///
    /// Numeric segments are ids and are not checked here: an id without projects
    /// simply lists nothing. Anything else is a slug that must match the
    /// lowercased name of an existing Tipo.
    pub async fn resolve_tipo(&self, identifier: &str) -> Result<TipoLookup, DbErr> {
        if let Ok(id) = identifier.parse::<i32>() {
            return Ok(TipoLookup::Id(id));
        }

        let slug = identifier.trim().to_lowercase();
        let found = self
            .list_types()
            .await?
            .into_iter()
            .find(|t| t.nome == slug);

        Ok(match found {
            Some(t) => TipoLookup::Id(t.id),
            None => TipoLookup::Unknown,
        })
    }
}
