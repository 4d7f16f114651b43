use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projetos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(64))")]
    pub nome: String,
    #[sea_orm(column_type = "String(StringLen::N(64))", nullable)]
    pub cliente: Option<String>,
    /// Bare filename of the project image inside the upload directory.
    #[sea_orm(column_type = "String(StringLen::N(128))", nullable)]
    pub path: Option<String>,
    pub tipo_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tipos::Entity",
        from = "Column::TipoId",
        to = "super::tipos::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Tipos,
    #[sea_orm(has_many = "super::fotos::Entity")]
    Fotos,
}

impl Related<super::tipos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tipos.def()
    }
}

impl Related<super::fotos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fotos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
