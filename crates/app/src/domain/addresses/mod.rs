//! Saved shipping addresses for registered users.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::AddressesServiceError;
pub(crate) use repository::PgAddressesRepository;
pub use service::*;
