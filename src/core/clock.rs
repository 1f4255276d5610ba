//! Time sources

use chrono::{Local, NaiveDate};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

pub trait Clock: Send + Sync {
    /// Wall-clock time, used for cache expiry.
    fn now(&self) -> SystemTime;

    /// The local calendar date, used when a lookup names no date.
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen on a given day whose time only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    start: SystemTime,
    elapsed_ms: AtomicU64,
    today: NaiveDate,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            start: SystemTime::now(),
            elapsed_ms: AtomicU64::new(0),
            today,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed_ms.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        self.start + Duration::from_millis(self.elapsed_ms.load(Ordering::SeqCst))
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
