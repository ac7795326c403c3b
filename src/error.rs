use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which date field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Day,
    Month,
    Year,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Day => "day",
            Field::Month => "month",
            Field::Year => "year",
        };
        f.write_str(name)
    }
}

/// A per-field defect. Returned as data by the form layer, never raised.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{field}: {reason}")]
pub struct FieldInvalid {
    pub field: Field,
    pub reason: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgeError {
    #[error("Invalid date of birth: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: i32, day: i32 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, AgeError>;
