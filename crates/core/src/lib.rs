//! Domain logic for the restaurant ordering backend.
//!
//! This crate has no database or HTTP dependency. The order engine in
//! [`commande`] talks to persistence through the [`commande::CommandeStore`]
//! trait, implemented over PostgreSQL by the API crate.

pub mod catalog;
pub mod commande;
pub mod error;
pub mod order_status;
pub mod pricing;
pub mod roles;
pub mod snapshot;
pub mod types;
