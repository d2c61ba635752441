//! Catalog service: Product bounded context.
//!
//! Responsible for the product aggregate, its persistence port and the
//! product use cases (fetch, search, create, update, remove).

pub mod application;
pub mod domain;
