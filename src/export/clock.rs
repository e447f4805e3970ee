use chrono::{DateTime, Utc};

/// Source of the timestamp used in output file names.
pub trait ExportClock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ExportClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl ExportClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
