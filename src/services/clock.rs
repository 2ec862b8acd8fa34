//! Source of the current calendar date

use chrono::{Local, NaiveDate};

#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
