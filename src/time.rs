//! Injectable wall clock.
//!
//! Failures are stamped with the time they were recorded so the status line
//! can show when the last error happened. Production code uses
//! `SystemClock`; tests pin the instant with `FixedClock`.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};

pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the instant it was built with.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub type SharedClock = Arc<dyn Clock>;

pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock)
}

pub fn fixed_clock(now: DateTime<Utc>) -> SharedClock {
    Arc::new(FixedClock::new(now))
}

/// `HH:MM:SS` in the local timezone, for status messages.
pub fn format_clock_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}
