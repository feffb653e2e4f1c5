//! Domain aggregates exposed by the catalog service layer.

pub mod product;
pub mod types;
