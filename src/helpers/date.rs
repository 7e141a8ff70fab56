//! Date helper functions

use anyhow::{anyhow, bail, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::fmt::Write;

/// Format a date using a Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMMM DD, YYYY")? // -> "January 05, 2021"
/// ```
pub fn format_date(date: &NaiveDate, format: &str) -> Result<String> {
    let chrono_format = moment_to_chrono_format(format);
    let items = StrftimeItems::new(&chrono_format);
    if items.clone().any(|item| matches!(item, Item::Error)) {
        bail!("Unsupported date format {:?}", format);
    }

    let mut out = String::new();
    write!(out, "{}", date.format_with_items(items))
        .map_err(|_| anyhow!("Date format {:?} asks for more than a calendar date", format))?;
    Ok(out)
}

/// Fail unless `format` can render a calendar date
pub fn check_date_format(format: &str) -> Result<()> {
    format_date(&NaiveDate::default(), format).map(|_| ())
}

/// Format a date for a `datetime` attribute
pub fn date_iso(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest tokens first within each family
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("Do", "%-d"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
