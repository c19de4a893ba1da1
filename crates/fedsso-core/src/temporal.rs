//! The temporal source.
//!
//! Every time-dependent check reads "now" through a [`Clock`] handed in at
//! construction, never through a direct system call. Production code uses
//! [`SystemClock`]; tests pin an instant with [`FixedClock`] so a whole
//! validation run observes one consistent time.

use chrono::{DateTime, Utc};

/// A source of the current time.
///
/// Implementations must re-read the time on every call rather than caching
/// it, so a long validation pass sees a consistent but not artificially
/// frozen clock unless one was injected deliberately.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a fixed instant, for deterministic validation replay.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
