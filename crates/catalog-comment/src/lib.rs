//! Catalog service: Comment bounded context.
//!
//! Comments belong to a product and are authored by a user. Only the author
//! may edit or delete a comment.

pub mod application;
pub mod domain;
