pub mod prelude;

pub mod fotos;
pub mod projetos;
pub mod roles;
pub mod roles_users;
pub mod tipos;
pub mod users;
