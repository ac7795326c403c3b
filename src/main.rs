use age_calculator::config::{CliArgs, FileConfig, Settings};
use age_calculator::form::{FormState, Submission};
use age_calculator::{logger, render};
use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, Write};

/// Reads one line after printing `label`. End of input reads as blank.
fn prompt(input: &mut impl BufRead, label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

fn read_form(args: &CliArgs) -> Result<FormState> {
    if !args.interactive {
        return Ok(FormState::new(
            args.day.as_deref().unwrap_or_default(),
            args.month.as_deref().unwrap_or_default(),
            args.year.as_deref().unwrap_or_default(),
        ));
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let form = FormState::default()
        .with_day(&prompt(&mut input, "Day (DD)")?)
        .with_month(&prompt(&mut input, "Month (MM)")?)
        .with_year(&prompt(&mut input, "Year (YYYY)")?);
    Ok(form)
}

fn run(args: &CliArgs) -> Result<Submission> {
    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(args, file_config, Local::now().date_naive());
    tracing::debug!("Settings: {:?}", settings);

    let form = read_form(args)?.normalized();
    tracing::info!(
        day = form.day(),
        month = form.month(),
        year = form.year(),
        today = %settings.today,
        "Calculating age"
    );

    let submission = form.submit(settings.today);
    let rendered = render::render(&submission, settings.format, settings.theme);

    match &settings.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Output saved to: {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(submission)
}

fn main() {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);
    tracing::debug!("CLI args: {:?}", args);

    match run(&args) {
        Ok(Submission::Age(age)) => tracing::debug!(%age, "Done"),
        Ok(Submission::Rejected(errors)) => {
            for error in &errors {
                tracing::debug!(field = %error.field, "{}", error.reason);
            }
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("❌ {e:#}");
            std::process::exit(2);
        }
    }
}
