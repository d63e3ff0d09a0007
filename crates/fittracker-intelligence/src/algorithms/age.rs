// ABOUTME: Calendar age calculation from a date of birth
// ABOUTME: Whole years, decremented until the birthday has passed in the current year
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Datelike, NaiveDate};

/// Age in whole years on `today`
///
/// The year difference is reduced by one when `today` falls before the
/// birthday's month/day. A 29 February birthday is reached on 1 March in
/// non-leap years.
#[must_use]
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years - 1
    } else {
        years
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_day_before_birthday() {
        assert_eq!(age_on(date(2000, 6, 15), date(2024, 6, 14)), 23);
    }

    #[test]
    fn test_on_birthday() {
        assert_eq!(age_on(date(2000, 6, 15), date(2024, 6, 15)), 24);
    }

    #[test]
    fn test_earlier_month_counts_as_before_birthday() {
        assert_eq!(age_on(date(2000, 6, 15), date(2024, 5, 30)), 23);
    }

    #[test]
    fn test_leap_day_birthday() {
        assert_eq!(age_on(date(2004, 2, 29), date(2023, 2, 28)), 18);
        assert_eq!(age_on(date(2004, 2, 29), date(2023, 3, 1)), 19);
    }

    #[test]
    fn test_future_date_is_negative() {
        assert_eq!(age_on(date(2030, 1, 1), date(2024, 1, 1)), -6);
    }
}
