//! Product Variant Handlers

pub(crate) mod create;
