//! Orders
//!
//! Checkout turns an owner's active cart into an order whose line prices are frozen at
//! the moment of purchase. Everything after the initial cart lock happens in a single
//! transaction, so a failure at any step leaves the cart untouched.

pub mod data;
pub mod errors;
pub mod pricing;
pub mod records;
mod repositories;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
