//! age.rs
//!
//! This module decomposes the time between a birth date and a reference
//! date into whole years, months and days.
//!
//! Chrono does not provide a built-in year/month/day diff (unlike Python’s
//! relativedelta), so we implement the calendar-aware borrowing rules manually.
//!
//! This logic correctly handles:
//!   • month underflow (borrowing from years)
//!   • day underflow (borrowing from the month before the reference date)
//!   • leap years
//!   • varying month lengths
//!
//! Days are always borrowed from the month preceding the reference date,
//! never from the birth month. For a birth on the 31st this can differ by a
//! day from counting against the birth month; that is the intended reading.
//! When that month is too short to cover the deficit, the month before it
//! lends as well.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::calendar::last_day_of_previous_month;
use crate::error::{AgeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeBreakdown {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl AgeBreakdown {
    /// No result computed yet, or the last computation failed. Distinct
    /// from a zero-day-old result.
    pub const UNSET: AgeBreakdown = AgeBreakdown {
        years: -1,
        months: -1,
        days: -1,
    };

    pub fn is_unset(&self) -> bool {
        *self == Self::UNSET
    }
}

impl Default for AgeBreakdown {
    fn default() -> Self {
        Self::UNSET
    }
}

impl fmt::Display for AgeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unset() {
            return f.write_str("-- years, -- months, -- days");
        }
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

pub(crate) fn plural(n: i32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Builds the birth date from one-based calendar fields. Anything that is
/// not a real calendar date is rejected instead of rolled over.
fn birth_date(year: i32, month: i32, day: i32) -> Result<NaiveDate> {
    let invalid = || AgeError::InvalidDate { year, month, day };
    let month = u32::try_from(month).map_err(|_| invalid())?;
    let day = u32::try_from(day).map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Age at `today` of someone born on `year`-`month`-`day`.
///
/// Expects a birth date no later than `today`; the validator is responsible
/// for rejecting future years before this is called.
pub fn calculate_age(year: i32, month: i32, day: i32, today: NaiveDate) -> Result<AgeBreakdown> {
    let birthdate = birth_date(year, month, day)?;

    let mut years = today.year() - birthdate.year();
    let mut months = today.month() as i32 - birthdate.month() as i32;
    let mut days = today.day() as i32 - birthdate.day() as i32;

    // Fix day underflow. A second borrow is only needed when February was
    // too short, e.g. born on the 31st and counted on the 1st of March.
    let (mut borrow_year, mut borrow_month0) = (today.year(), today.month0());
    while days < 0 {
        months -= 1;

        // Add days from the previous month (28–31 depending on month & leap year)
        let days_in_prev_month = last_day_of_previous_month(borrow_year, borrow_month0);
        days += days_in_prev_month as i32;

        if borrow_month0 == 0 {
            borrow_year -= 1;
            borrow_month0 = 11;
        } else {
            borrow_month0 -= 1;
        }
    }

    // Fix month underflow
    if months < 0 {
        years -= 1;
        months += 12;
    }

    tracing::trace!(%birthdate, %today, years, months, days, "age computed");

    Ok(AgeBreakdown {
        years,
        months,
        days,
    })
}

/// [`calculate_age`] against the local calendar date.
pub fn calculate_age_today(year: i32, month: i32, day: i32) -> Result<AgeBreakdown> {
    calculate_age(year, month, day, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn age(years: i32, months: i32, days: i32) -> AgeBreakdown {
        AgeBreakdown {
            years,
            months,
            days,
        }
    }

    #[test]
    fn test_exact_years() {
        let result = calculate_age(2000, 1, 1, date(2024, 1, 1)).unwrap();
        assert_eq!(result, age(24, 0, 0));
    }

    #[test]
    fn test_borrows_months_and_days() {
        // Days are borrowed from February 2024, which has 29 days
        let result = calculate_age(2000, 3, 15, date(2024, 3, 1)).unwrap();
        assert_eq!(result, age(23, 11, 15));

        let result = calculate_age(2000, 3, 15, date(2023, 3, 1)).unwrap();
        assert_eq!(result, age(22, 11, 14));
    }

    #[test]
    fn test_borrow_in_january_uses_december() {
        let result = calculate_age(1990, 6, 20, date(2024, 1, 5)).unwrap();
        assert_eq!(result, age(33, 6, 16));
    }

    #[test]
    fn test_borrow_uses_month_before_reference() {
        // Born on the 31st, counted on the 1st of May: April lends 30 days
        let result = calculate_age(2020, 1, 31, date(2024, 5, 1)).unwrap();
        assert_eq!(result, age(4, 3, 0));
    }

    #[test]
    fn test_short_february_borrows_twice() {
        let result = calculate_age(2023, 1, 31, date(2023, 3, 1)).unwrap();
        assert_eq!(result, age(0, 0, 29));

        let result = calculate_age(2024, 1, 31, date(2024, 3, 1)).unwrap();
        assert_eq!(result, age(0, 0, 30));

        let result = calculate_age(1999, 12, 30, date(2023, 3, 1)).unwrap();
        assert_eq!(result, age(23, 1, 30));
    }

    #[test]
    fn test_same_day_is_zero() {
        for today in [date(2024, 2, 29), date(1970, 1, 1), date(2023, 12, 31)] {
            let (year, month, day) = (today.year(), today.month() as i32, today.day() as i32);
            let result = calculate_age(year, month, day, today).unwrap();
            assert_eq!(result, age(0, 0, 0));
            assert!(!result.is_unset());
        }
    }

    #[test]
    fn test_leap_day_birthday() {
        let result = calculate_age(2020, 2, 29, date(2023, 2, 28)).unwrap();
        assert_eq!(result, age(2, 11, 30));

        let result = calculate_age(2020, 2, 29, date(2024, 2, 29)).unwrap();
        assert_eq!(result, age(4, 0, 0));
    }

    #[test]
    fn test_future_birth_date_is_not_rejected() {
        // One day in the future within the same month goes through both borrows
        let result = calculate_age(2024, 6, 16, date(2024, 6, 15)).unwrap();
        assert_eq!(result.years, -1);
        assert_eq!(result.months, 11);
        assert_eq!(result.days, 30);
    }

    #[test]
    fn test_invalid_dates() {
        let today = date(2024, 6, 15);
        let cases = [
            (2023, 2, 29),
            (2023, 4, 31),
            (2023, 13, 1),
            (2023, 0, 1),
            (2023, 1, 0),
            (2023, -1, 5),
            (2023, 5, -3),
        ];
        for (year, month, day) in cases {
            assert_eq!(
                calculate_age(year, month, day, today),
                Err(AgeError::InvalidDate { year, month, day })
            );
        }
    }

    #[test]
    fn test_calculation_is_repeatable() {
        let today = date(2024, 3, 1);
        assert_eq!(
            calculate_age(1999, 12, 31, today),
            calculate_age(1999, 12, 31, today)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(age(1, 1, 1).to_string(), "1 year, 1 month, 1 day");
        assert_eq!(age(32, 0, 12).to_string(), "32 years, 0 months, 12 days");
        assert_eq!(AgeBreakdown::UNSET.to_string(), "-- years, -- months, -- days");
    }

    #[test]
    fn test_unset_sentinel() {
        assert!(AgeBreakdown::UNSET.is_unset());
        assert!(AgeBreakdown::default().is_unset());
        assert!(!age(0, 0, 0).is_unset());
    }
}
