pub mod age;
pub mod calendar;
pub mod config;
pub mod error;
pub mod form;
pub mod logger;
pub mod render;
pub mod validate;

pub use age::{AgeBreakdown, calculate_age, calculate_age_today};
pub use calendar::{days_in_month, is_leap_year, last_day_of_previous_month};
pub use error::{AgeError, ConfigError, Field, FieldInvalid};
pub use form::{DatePart, FormState, FormValidation, Submission};
pub use validate::{ValidationResult, validate_day, validate_month, validate_year};
