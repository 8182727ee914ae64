//! Order administration

mod handlers;

pub(crate) use handlers::*;
