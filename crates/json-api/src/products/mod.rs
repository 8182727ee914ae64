//! Products

pub(crate) mod errors;
mod handlers;
pub(crate) mod variants;

pub(crate) use handlers::*;
