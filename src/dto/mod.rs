//! DTOs exchanged between the HTTP layer and the services.

pub mod product;
