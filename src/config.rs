use chrono::NaiveDate;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::render::{OutputFormat, Theme};

#[derive(Debug, Clone, Parser)]
#[command(name = "age-calculator")]
#[command(about = "Compute an age in years, months and days from a date of birth")]
pub struct CliArgs {
    /// Day of birth (DD)
    #[arg(short, long)]
    pub day: Option<String>,

    /// Month of birth (MM)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Year of birth (YYYY)
    #[arg(short, long)]
    pub year: Option<String>,

    /// Reference date to count up to, defaults to the local date
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(long, value_enum)]
    pub theme: Option<Theme>,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML file with defaults for format, theme and today
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Prompt for the date of birth on stdin
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
    pub format: Option<OutputFormat>,
    pub theme: Option<Theme>,
    pub today: Option<NaiveDate>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Effective settings after merging flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    pub theme: Theme,
    pub today: NaiveDate,
    pub output: Option<PathBuf>,
}

impl Settings {
    /// Flags win over the file; `local_today` is used when neither sets a
    /// reference date.
    pub fn resolve(args: &CliArgs, file: FileConfig, local_today: NaiveDate) -> Self {
        Self {
            format: args.format.or(file.format).unwrap_or_default(),
            theme: args.theme.or(file.theme).unwrap_or_default(),
            today: args.today.or(file.today).unwrap_or(local_today),
            output: args.output.clone(),
        }
    }
}
