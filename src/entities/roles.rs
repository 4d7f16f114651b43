use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique, column_type = "String(StringLen::N(80))")]
    pub name: String,
    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::roles_users::Entity")]
    RolesUsers,
}

impl Related<super::roles_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RolesUsers.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::roles_users::Relation::Users.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::roles_users::Relation::Roles.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
