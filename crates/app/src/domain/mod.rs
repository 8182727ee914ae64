//! Storefront Domain Concerns

pub mod addresses;
pub mod carts;
pub mod money;
pub mod orders;
pub mod owners;
pub mod products;
