//! User domain model and persistence port.

pub mod aggregates;
pub mod repository;
