//! Catalog Store: driven adapters for the catalog repositories.
//!
//! [`memory::InMemoryStore`] implements every repository port behind a
//! single readers-writer lock and is intended for development and tests.
//! The `pg_*` modules implement the same ports over a `sqlx::PgPool`.

pub mod memory;
pub mod pg_comment_repository;
pub mod pg_product_repository;
pub mod pg_user_repository;

mod pg_error;
