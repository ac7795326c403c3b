//! Per-field checks for the day, month and year inputs.
//!
//! Each check stands alone and returns a fresh [`ValidationResult`]; the
//! caller decides the form is valid only when all three are. The checks do
//! not verify that the three fields jointly form a date in the past: the
//! year is compared against the reference year only.

use chrono::{Datelike, NaiveDate};

use crate::calendar::days_in_month;
use crate::error::{Field, FieldInvalid};

pub const REQUIRED: &str = "This field is required";
pub const MUST_BE_IN_PAST: &str = "Must be in the past";
pub const INVALID_YEAR: &str = "Must be a valid year";
pub const INVALID_MONTH: &str = "Must be a valid month";
pub const INVALID_DAY: &str = "Must be a valid day";
pub const INVALID_DATE: &str = "Must be a valid date";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Empty when valid
    pub error_message: String,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: String::new(),
        }
    }

    pub fn invalid(message: &str) -> Self {
        Self {
            is_valid: false,
            error_message: message.to_string(),
        }
    }

    /// `None` when the result is valid.
    pub fn to_field_error(&self, field: Field) -> Option<FieldInvalid> {
        if self.is_valid {
            return None;
        }
        Some(FieldInvalid {
            field,
            reason: self.error_message.clone(),
        })
    }
}

/// Rejects blank input, years before the earliest representable date and
/// years after `today`'s year.
pub fn validate_year(year: i32, is_empty: bool, today: NaiveDate) -> ValidationResult {
    if is_empty {
        return ValidationResult::invalid(REQUIRED);
    }
    if year < NaiveDate::MIN.year() {
        return ValidationResult::invalid(INVALID_YEAR);
    }
    if year > today.year() {
        return ValidationResult::invalid(MUST_BE_IN_PAST);
    }
    ValidationResult::valid()
}

pub fn validate_month(month: i32, is_empty: bool) -> ValidationResult {
    if is_empty {
        return ValidationResult::invalid(REQUIRED);
    }
    if !(1..=12).contains(&month) {
        return ValidationResult::invalid(INVALID_MONTH);
    }
    ValidationResult::valid()
}

/// Checks `day` against the length of `month` in `year`. An unset or
/// out-of-range month bounds the day at 31, so the day can be checked
/// before the month is filled in.
pub fn validate_day(day: i32, month: i32, year: i32, is_empty: bool) -> ValidationResult {
    if is_empty {
        return ValidationResult::invalid(REQUIRED);
    }
    let max_day = days_in_month(month, year) as i32;
    if day < 1 || day > max_day {
        return ValidationResult::invalid(INVALID_DAY);
    }
    ValidationResult::valid()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_validate_day() {
        assert!(!validate_day(31, 4, 2023, false).is_valid);
        assert!(validate_day(30, 4, 2023, false).is_valid);
        assert!(validate_day(29, 2, 2024, false).is_valid);
        assert!(!validate_day(29, 2, 2023, false).is_valid);
        assert!(!validate_day(0, 1, 2023, false).is_valid);

        let result = validate_day(32, 1, 2023, false);
        assert_eq!(result.error_message, INVALID_DAY);
    }

    #[test]
    fn test_validate_day_without_month() {
        // Month not entered yet: bounded at 31
        assert!(validate_day(31, 0, 2023, false).is_valid);
        assert!(!validate_day(32, 0, 2023, false).is_valid);
        assert!(validate_day(31, 13, 2023, false).is_valid);
    }

    #[test]
    fn test_validate_month() {
        assert!(!validate_month(0, false).is_valid);
        assert!(!validate_month(13, false).is_valid);
        assert!(validate_month(1, false).is_valid);
        assert!(validate_month(12, false).is_valid);
        assert_eq!(validate_month(13, false).error_message, INVALID_MONTH);
    }

    #[test]
    fn test_validate_year() {
        let today = today();
        assert!(!validate_year(2025, false, today).is_valid);
        assert_eq!(validate_year(2025, false, today).error_message, MUST_BE_IN_PAST);
        assert!(validate_year(2024, false, today).is_valid);
        assert!(validate_year(1900, false, today).is_valid);
    }

    #[test]
    fn test_validate_year_outside_date_range() {
        let today = today();
        let earliest = NaiveDate::MIN.year();
        assert!(validate_year(earliest, false, today).is_valid);
        assert_eq!(
            validate_year(earliest - 1, false, today).error_message,
            INVALID_YEAR
        );
        assert_eq!(validate_year(-300_000, false, today).error_message, INVALID_YEAR);
        assert_eq!(validate_year(i32::MIN, false, today).error_message, INVALID_YEAR);
    }

    #[test]
    fn test_empty_fields_are_required() {
        let required = ValidationResult::invalid(REQUIRED);
        assert_eq!(validate_day(0, 0, 0, true), required);
        assert_eq!(validate_month(0, true), required);
        assert_eq!(validate_year(0, true, today()), required);
    }

    #[test]
    fn test_empty_takes_precedence_over_value() {
        assert_eq!(validate_month(5, true).error_message, REQUIRED);
    }

    #[test]
    fn test_validation_is_repeatable() {
        assert_eq!(validate_day(29, 2, 2023, false), validate_day(29, 2, 2023, false));
        assert_eq!(
            validate_year(2030, false, today()),
            validate_year(2030, false, today())
        );
    }

    #[test]
    fn test_to_field_error() {
        assert_eq!(ValidationResult::valid().to_field_error(Field::Day), None);

        let error = validate_month(13, false).to_field_error(Field::Month).unwrap();
        assert_eq!(error.field, Field::Month);
        assert_eq!(error.reason, INVALID_MONTH);
        assert_eq!(error.to_string(), "month: Must be a valid month");
    }
}
