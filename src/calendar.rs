//! calendar.rs
//!
//! Gregorian calendar arithmetic shared by the validator and the age
//! calculator. All functions are total: out-of-range months fall back to a
//! 31-day month so a day can be checked before the month is known.

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Returns number of days in a given month (1-12) of `year`.
pub fn days_in_month(month: i32, year: i32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        // Unset or out of range
        _ => 31,
    }
}

/// Day count of the month immediately before `reference_month0`
/// (zero-based, 0 = January) in `reference_year`.
pub fn last_day_of_previous_month(reference_year: i32, reference_month0: u32) -> u32 {
    if reference_month0 == 0 {
        days_in_month(12, reference_year - 1)
    } else {
        // zero-based current month == one-based previous month
        days_in_month(reference_month0 as i32, reference_year)
    }
}
