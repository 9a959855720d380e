//! Property-based tests for trading-day normalization.
//!
//! These tests check that normalization holds across arbitrary dates,
//! using the `proptest` crate for random test case generation.

use chrono::{Datelike, NaiveDate, Weekday};
use proptest::prelude::*;
use tmx_market_data::calendar::{holidays_for_year, DateNormalizer, HolidayCalendar};

// =============================================================================
// Generators
// =============================================================================

/// Generates a date between 2000-01-01 and roughly 2060.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..22_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

/// Generates a Saturday or Sunday.
fn arb_weekend_date() -> impl Strategy<Value = NaiveDate> {
    arb_date().prop_map(|date| {
        let to_saturday = (6 + 7 - date.weekday().num_days_from_monday() as i64 - 1) % 7;
        date + chrono::Duration::days(to_saturday)
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn normalize_is_idempotent(date in arb_date()) {
        let normalizer = DateNormalizer::default();
        let once = normalizer.normalize(date).unwrap();
        prop_assert_eq!(normalizer.normalize(once).unwrap(), once);
    }

    #[test]
    fn normalize_lands_on_a_trading_day(date in arb_date()) {
        let normalizer = DateNormalizer::default();
        let calendar = HolidayCalendar::new();
        let adjusted = normalizer.normalize(date).unwrap();

        prop_assert!(!matches!(adjusted.weekday(), Weekday::Sat | Weekday::Sun));
        prop_assert!(!calendar.is_holiday(adjusted));
    }

    #[test]
    fn normalize_never_moves_backwards_or_far(date in arb_date()) {
        let adjusted = DateNormalizer::default().normalize(date).unwrap();
        prop_assert!(adjusted >= date);
        prop_assert!((adjusted - date).num_days() <= 5);
    }

    #[test]
    fn weekend_dates_normalize_to_weekdays(date in arb_weekend_date()) {
        prop_assert!(matches!(date.weekday(), Weekday::Sat | Weekday::Sun));

        let adjusted = DateNormalizer::default().normalize(date).unwrap();
        prop_assert!(!matches!(adjusted.weekday(), Weekday::Sat | Weekday::Sun));
    }

    #[test]
    fn holidays_are_weekdays_within_their_year(year in 2000i32..2060) {
        let holidays = holidays_for_year(year);
        prop_assert_eq!(holidays.len(), 10);
        for day in holidays {
            prop_assert!(!matches!(day.weekday(), Weekday::Sat | Weekday::Sun));
        }
    }
}
