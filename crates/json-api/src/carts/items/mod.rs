//! Cart items

mod handlers;

pub(crate) use handlers::*;
