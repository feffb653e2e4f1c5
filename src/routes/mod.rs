//! HTTP layer: product handlers, error rendering and API documentation.

pub mod docs;
pub mod errors;
pub mod product;
