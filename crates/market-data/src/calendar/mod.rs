//! Trading-day calendar for the Canadian exchange group.

mod holidays;
mod normalizer;

pub use holidays::{holidays_for_year, HolidayCalendar};
pub use normalizer::{DateNormalizer, MAX_PASSES};
