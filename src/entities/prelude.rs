pub use super::fotos::Entity as Fotos;
pub use super::projetos::Entity as Projetos;
pub use super::roles::Entity as Roles;
pub use super::roles_users::Entity as RolesUsers;
pub use super::tipos::Entity as Tipos;
pub use super::users::Entity as Users;
