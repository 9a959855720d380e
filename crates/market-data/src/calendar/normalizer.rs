//! Rolls a requested as-of date forward to a trading day.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use log::debug;

use super::holidays::HolidayCalendar;
use crate::errors::MarketDataError;

/// Upper bound on weekend/holiday passes before giving up.
pub const MAX_PASSES: usize = 5;

#[derive(Clone, Debug, Default)]
pub struct DateNormalizer {
    calendar: HolidayCalendar,
}

impl DateNormalizer {
    pub fn new(calendar: HolidayCalendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// The first trading day on or after `date`.
    ///
    /// Each pass moves a weekend date to Monday, then a holiday forward one
    /// day. The result is a weekday that is not a holiday, so normalizing it
    /// again returns it unchanged.
    pub fn normalize(&self, date: NaiveDate) -> Result<NaiveDate, MarketDataError> {
        let mut current = date;

        for _ in 0..MAX_PASSES {
            current = skip_weekend(current).ok_or_else(|| self.resolution_error(date))?;
            if !self.calendar.is_holiday(current) {
                if current != date {
                    debug!("Adjusted {} to trading day {}", date, current);
                }
                return Ok(current);
            }
            current = current
                .checked_add_days(Days::new(1))
                .ok_or_else(|| self.resolution_error(date))?;
        }

        Err(self.resolution_error(date))
    }

    fn resolution_error(&self, date: NaiveDate) -> MarketDataError {
        MarketDataError::DateResolution {
            date,
            passes: MAX_PASSES,
        }
    }
}

fn skip_weekend(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.checked_add_days(Days::new(2)),
        Weekday::Sun => date.checked_add_days(Days::new(1)),
        _ => Some(date),
    }
}
