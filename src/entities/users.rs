use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique, column_type = "String(StringLen::N(255))")]
    pub email: String,
    /// Argon2 PHC string, never the clear password.
    #[serde(skip_serializing)]
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub password: String,
    pub active: bool,
    pub confirmed_at: Option<DateTimeUtc>,
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

impl Related<super::roles::Entity> for Entity {
    fn to() -> RelationDef {
        super::roles_users::Relation::Roles.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::roles_users::Relation::Users.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
