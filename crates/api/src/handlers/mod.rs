pub mod auth;
pub mod commandes;
pub mod menus;
pub mod products;
pub mod users;
