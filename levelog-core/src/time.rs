//! Wall-clock access and `HH:MM:SS.mmm` rendering.

use chrono::{DateTime, Local};

/// Source of emission timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Fixed instant, for reproducible output.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Renders local time of day with millisecond precision, zero padded.
pub fn format_time(time: &DateTime<Local>) -> String {
    time.format("%H:%M:%S%.3f").to_string()
}
