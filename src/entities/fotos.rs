use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fotos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(128))", nullable)]
    pub titulo: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub legenda: Option<String>,
    /// Bare filename of the photo inside the upload directory.
    #[sea_orm(column_type = "String(StringLen::N(128))", nullable)]
    pub path: Option<String>,
    pub id_projeto: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projetos::Entity",
        from = "Column::IdProjeto",
        to = "super::projetos::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Projetos,
}

impl Related<super::projetos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projetos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
