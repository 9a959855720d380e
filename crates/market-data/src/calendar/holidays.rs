//! Toronto Stock Exchange / Montréal Exchange holiday calendar.
//!
//! Holidays are computed from their rules rather than read from a table, so
//! any year works without maintenance. Observed dates follow the exchange:
//! a fixed-date holiday falling on a weekend moves to the next business day.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Holiday calendar for the Canadian exchange group.
#[derive(Clone, Debug, Default)]
pub struct HolidayCalendar {
    extra: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add ad-hoc closures (e.g. a national day of mourning).
    pub fn with_extra_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.extra.extend(dates);
        self
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.extra.contains(&date) || holidays_for_year(date.year()).contains(&date)
    }
}

/// Every exchange holiday in `year`, ascending.
pub fn holidays_for_year(year: i32) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(11);

    if let Some(new_year) = ymd(year, 1, 1) {
        days.push(observed(new_year));
    }
    days.extend(nth_weekday(year, 2, Weekday::Mon, 3)); // Family Day
    days.extend(easter_sunday(year).and_then(|e| e.checked_sub_signed(Duration::days(2))));
    days.extend(victoria_day(year));
    if let Some(canada_day) = ymd(year, 7, 1) {
        days.push(observed(canada_day));
    }
    days.extend(nth_weekday(year, 8, Weekday::Mon, 1)); // Civic Holiday
    days.extend(nth_weekday(year, 9, Weekday::Mon, 1)); // Labour Day
    days.extend(nth_weekday(year, 10, Weekday::Mon, 2)); // Thanksgiving
    days.extend(christmas_closures(year));

    days.sort();
    days
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Saturday and Sunday holidays are observed on the following Monday.
fn observed(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n as u8)
}

/// Last Monday on or before May 24.
fn victoria_day(year: i32) -> Option<NaiveDate> {
    let may_24 = ymd(year, 5, 24)?;
    let back = may_24.weekday().num_days_from_monday();
    Some(may_24 - Duration::days(back as i64))
}

/// Christmas and Boxing Day, both shifted off the weekend.
fn christmas_closures(year: i32) -> Vec<NaiveDate> {
    let Some(christmas) = ymd(year, 12, 25) else {
        return Vec::new();
    };

    let (first, second) = match christmas.weekday() {
        Weekday::Sat => (2, 3),
        Weekday::Sun => (1, 2),
        Weekday::Fri => (0, 3),
        _ => (0, 1),
    };
    vec![
        christmas + Duration::days(first),
        christmas + Duration::days(second),
    ]
}

/// Gregorian Easter Sunday (anonymous algorithm).
fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    ymd(year, month as u32, day as u32)
}
