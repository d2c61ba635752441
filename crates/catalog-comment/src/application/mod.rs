//! Comment application layer.

pub mod service;
