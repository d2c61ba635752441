//! User application layer.

pub mod service;
