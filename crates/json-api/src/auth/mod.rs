//! Request identity

mod identity;
pub(crate) mod middleware;

pub(crate) use identity::Identity;
