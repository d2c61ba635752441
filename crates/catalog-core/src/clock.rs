//! Time source for entity timestamps.

use chrono::{DateTime, SubsecRound, Utc};

/// Supplies the current UTC time to services that stamp entities.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock, truncated to whole microseconds so a timestamp reads back
/// unchanged from a PostgreSQL `TIMESTAMPTZ` column.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }
}
