//! Wall-clock access for event timestamps and report exports.
//!
//! The engine never calls `Utc::now()` itself; it asks its GameClock,
//! so tests can pin the time.

use chrono::{DateTime, Utc};

pub trait GameClock: Send {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl GameClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub at: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }
}

impl GameClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}
