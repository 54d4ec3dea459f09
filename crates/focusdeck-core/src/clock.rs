//! Wall-clock capability.
//!
//! The streak day boundary is the local calendar date, not an elapsed
//! 24-hour window, so the ledger is handed today's date by its caller
//! instead of reading time itself. Production code gets the date from
//! [`SystemClock`]; tests inject a [`FixedClock`].

use chrono::{Local, NaiveDate};

pub trait Clock {
    /// Today's date in the local calendar.
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Fixed-date clock for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
