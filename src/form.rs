//! The date-of-birth form: three raw text fields, sanitized as they are
//! typed, padded when they lose focus, and turned into an age on submit.
//!
//! `FormState` is never mutated; every edit produces a new value.

use chrono::NaiveDate;

use crate::age::{AgeBreakdown, calculate_age};
use crate::error::{AgeError, Field, FieldInvalid};
use crate::validate::{
    INVALID_DATE, ValidationResult, validate_day, validate_month, validate_year,
};

pub const DAY_DIGITS: usize = 2;
pub const MONTH_DIGITS: usize = 2;
pub const YEAR_DIGITS: usize = 4;

/// Keeps only ASCII digits, at most `max_digits` of them.
pub fn sanitize(raw: &str, max_digits: usize) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(max_digits)
        .collect()
}

/// Left-pads with zeros to `width`. A blank field stays blank.
pub fn pad(value: &str, width: usize) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!("{value:0>width$}")
}

/// One parsed field. Text that is not a number, or does not fit an `i32`,
/// parses to `i32::MIN`, which every validator rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePart {
    pub value: i32,
    pub empty: bool,
}

impl DatePart {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self {
                value: 0,
                empty: true,
            };
        }
        Self {
            value: text.parse().unwrap_or(i32::MIN),
            empty: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    day: String,
    month: String,
    year: String,
}

impl FormState {
    pub fn new(day: &str, month: &str, year: &str) -> Self {
        Self {
            day: sanitize(day, DAY_DIGITS),
            month: sanitize(month, MONTH_DIGITS),
            year: sanitize(year, YEAR_DIGITS),
        }
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn with_day(&self, raw: &str) -> Self {
        Self {
            day: sanitize(raw, DAY_DIGITS),
            ..self.clone()
        }
    }

    pub fn with_month(&self, raw: &str) -> Self {
        Self {
            month: sanitize(raw, MONTH_DIGITS),
            ..self.clone()
        }
    }

    pub fn with_year(&self, raw: &str) -> Self {
        Self {
            year: sanitize(raw, YEAR_DIGITS),
            ..self.clone()
        }
    }

    /// All fields zero-padded, as shown after they lose focus.
    pub fn normalized(&self) -> Self {
        Self {
            day: pad(&self.day, DAY_DIGITS),
            month: pad(&self.month, MONTH_DIGITS),
            year: pad(&self.year, YEAR_DIGITS),
        }
    }

    /// Parsed (day, month, year).
    pub fn parts(&self) -> (DatePart, DatePart, DatePart) {
        (
            DatePart::parse(&self.day),
            DatePart::parse(&self.month),
            DatePart::parse(&self.year),
        )
    }

    pub fn validate(&self, today: NaiveDate) -> FormValidation {
        let (day, month, year) = self.parts();
        FormValidation {
            day: validate_day(day.value, month.value, year.value, day.empty),
            month: validate_month(month.value, month.empty),
            year: validate_year(year.value, year.empty, today),
        }
    }

    /// Validates, then computes the age at `today`.
    pub fn submit(&self, today: NaiveDate) -> Submission {
        let validation = self.validate(today);
        if !validation.is_valid() {
            let errors = validation.errors();
            tracing::debug!(count = errors.len(), "submission rejected by validation");
            return Submission::Rejected(errors);
        }

        let (day, month, year) = self.parts();
        calculate_parts(day, month, year, today)
    }
}

/// Runs the calculator on already-validated parts. Validation rules out
/// unconstructable dates, so the `InvalidDate` arm only guards against the
/// two drifting apart.
fn calculate_parts(day: DatePart, month: DatePart, year: DatePart, today: NaiveDate) -> Submission {
    match calculate_age(year.value, month.value, day.value, today) {
        Ok(age) => {
            tracing::debug!(%age, "submission accepted");
            Submission::Age(age)
        }
        Err(AgeError::InvalidDate { .. }) => {
            tracing::debug!("birth date could not be constructed");
            Submission::Rejected(vec![FieldInvalid {
                field: Field::Day,
                reason: INVALID_DATE.to_string(),
            }])
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidation {
    pub day: ValidationResult,
    pub month: ValidationResult,
    pub year: ValidationResult,
}

impl FormValidation {
    pub fn is_valid(&self) -> bool {
        self.day.is_valid && self.month.is_valid && self.year.is_valid
    }

    /// Defects in day, month, year order.
    pub fn errors(&self) -> Vec<FieldInvalid> {
        [
            self.day.to_field_error(Field::Day),
            self.month.to_field_error(Field::Month),
            self.year.to_field_error(Field::Year),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Age(AgeBreakdown),
    Rejected(Vec<FieldInvalid>),
}

impl Submission {
    /// The computed age, or [`AgeBreakdown::UNSET`] when rejected.
    pub fn age(&self) -> AgeBreakdown {
        match self {
            Submission::Age(age) => *age,
            Submission::Rejected(_) => AgeBreakdown::UNSET,
        }
    }
}
