use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::age::{AgeBreakdown, plural};
use crate::error::FieldInvalid;
use crate::form::Submission;

const START_Y: i32 = 70;
const LINE_HEIGHT: i32 = 72;
const LEFT_PADDING: f32 = 40.0;
const CHAR_WIDTH: f32 = 36.0;
const RIGHT_PADDING: f32 = 40.0;
const BOTTOM_PADDING: f32 = 30.0;
const ERROR_LINE_HEIGHT: i32 = 24;
const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Svg,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
    pub error: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#141414",
                text: "#f0f0f0",
                accent: "#a680ff",
                error: "#ff8a8a",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#151515",
                accent: "#854dff",
                error: "#ff5959",
            },
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// (number, unit) rows for years, months and days. The sentinel renders
/// as placeholders.
fn result_rows(age: &AgeBreakdown) -> [(String, String); 3] {
    let row = |n: i32, unit: &str| {
        if age.is_unset() {
            (PLACEHOLDER.to_string(), format!("{unit}s"))
        } else {
            (n.to_string(), format!("{unit}{}", plural(n)))
        }
    };
    [
        row(age.years, "year"),
        row(age.months, "month"),
        row(age.days, "day"),
    ]
}

pub fn render(submission: &Submission, format: OutputFormat, theme: Theme) -> String {
    match format {
        OutputFormat::Text => render_text(submission),
        OutputFormat::Json => render_json(submission),
        OutputFormat::Svg => generate_svg(submission, theme),
    }
}

pub fn render_text(submission: &Submission) -> String {
    match submission {
        Submission::Age(age) => result_rows(age)
            .iter()
            .map(|(n, unit)| format!("{n} {unit}\n"))
            .collect(),
        Submission::Rejected(errors) => errors.iter().map(|e| format!("{e}\n")).collect(),
    }
}

pub fn render_json(submission: &Submission) -> String {
    #[derive(Serialize)]
    struct Rejection<'a> {
        errors: &'a [FieldInvalid],
    }

    let json = match submission {
        Submission::Age(age) => serde_json::to_string(age),
        Submission::Rejected(errors) => serde_json::to_string(&Rejection { errors }),
    };
    // Plain structs of integers and strings always serialize
    json.unwrap_or_default()
}

fn build_result_tspans(age: &AgeBreakdown) -> (String, usize) {
    let mut out = String::new();
    let mut max_chars = 0;

    for (i, (n, unit)) in result_rows(age).iter().enumerate() {
        let y = START_Y + (i as i32) * LINE_HEIGHT;
        max_chars = max_chars.max(n.len() + 1 + unit.len());
        out.push_str(&format!(
            r#"<tspan x="{LEFT_PADDING}" y="{y}" class="value">{}</tspan><tspan class="unit"> {}</tspan>
"#,
            escape_xml(n),
            escape_xml(unit)
        ));
    }

    (out, max_chars)
}

fn build_error_tspans(errors: &[FieldInvalid]) -> (String, usize) {
    let mut out = String::new();
    let mut max_chars = 0;

    for (i, error) in errors.iter().enumerate() {
        let y = START_Y + (i as i32) * ERROR_LINE_HEIGHT;
        let line = error.to_string();
        max_chars = max_chars.max(line.len());
        out.push_str(&format!(
            r#"<tspan x="{LEFT_PADDING}" y="{y}" class="error">{}</tspan>
"#,
            escape_xml(&line)
        ));
    }

    (out, max_chars)
}

/// Result card. Rejected submissions show the field errors above the
/// placeholder rows.
pub fn generate_svg(submission: &Submission, theme: Theme) -> String {
    let colors = theme.colors();

    let (error_tspans, error_chars, error_height) = match submission {
        Submission::Age(_) => (String::new(), 0, 0),
        Submission::Rejected(errors) => {
            let (tspans, chars) = build_error_tspans(errors);
            (tspans, chars, errors.len() as i32 * ERROR_LINE_HEIGHT)
        }
    };
    let (result_tspans, result_chars) = build_result_tspans(&submission.age());
    // A full result line of clearance below the last error line
    let result_offset = if error_height > 0 {
        error_height + LINE_HEIGHT
    } else {
        0
    };

    // Error lines use a smaller font, roughly a third of the result width
    let w = LEFT_PADDING
        + (result_chars as f32 * CHAR_WIDTH).max(error_chars as f32 * CHAR_WIDTH / 3.0)
        + RIGHT_PADDING;
    let h = (START_Y + result_offset + 2 * LINE_HEIGHT) as f32 + BOTTOM_PADDING;

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="Poppins,sans-serif">

<style>
.value {{ fill: {accent}; font-size: 64px; font-weight: 800; font-style: italic; }}
.unit  {{ fill: {text}; font-size: 64px; font-weight: 800; font-style: italic; }}
.error {{ fill: {error}; font-size: 16px; font-style: italic; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="24"/>

<!-- ERRORS -->
<text>
{errors}</text>

<!-- RESULT -->
<text transform="translate(0 {result_offset})">
{result}</text>

</svg>
"#,
        w = w,
        h = h,
        bg = colors.bg,
        text = colors.text,
        accent = colors.accent,
        error = colors.error,
        errors = error_tspans,
        result_offset = result_offset,
        result = result_tspans
    )
}
