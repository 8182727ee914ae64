//! Product Variants

mod handlers;

pub(crate) use handlers::*;
