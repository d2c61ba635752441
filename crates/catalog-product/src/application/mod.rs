//! Product application layer.

pub mod service;
