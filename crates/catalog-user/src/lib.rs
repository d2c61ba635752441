//! Catalog service: User bounded context.
//!
//! Users are read-mostly: the service exposes lookups only, and comments
//! reference users as their authors.

pub mod application;
pub mod domain;
