//! Repositories: zero-sized structs with async associated functions over `&PgPool`.

pub mod commande_repo;
pub mod menu_repo;
pub mod product_repo;
pub mod user_repo;

pub use commande_repo::CommandeRepo;
pub use menu_repo::MenuRepo;
pub use product_repo::ProductRepo;
pub use user_repo::UserRepo;
