//! Row models and DTOs, one module per table family.

pub mod commande;
pub mod menu;
pub mod product;
pub mod user;
