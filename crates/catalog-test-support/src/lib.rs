//! Shared test doubles and utilities for the catalog service.

mod clock;

pub use clock::{FixedClock, SteppingClock};
