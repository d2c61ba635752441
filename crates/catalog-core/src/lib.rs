//! Catalog Core: shared domain abstractions.
//!
//! This crate defines the error taxonomy, clock, pagination and money types
//! that every aggregate crate depends on. It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod money;
pub mod pagination;
