//! Extension traits

mod depot;
mod money;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use money::MoneyExt as _;
pub(crate) use result::ResultExt as _;
