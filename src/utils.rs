use std::{future::Future, time::Duration};

use chrono::{DateTime, Local, Utc};
use indicatif::{ProgressBar, ProgressStyle};

use crate::types::Exclusion;

/// Suffix that turns a `--regex-exclude` value into an inclusion.
pub const INVERSE_SUFFIX: &str = "-inverse";

/// Parses a duration such as `30s`, `500ms`, `2m`, `1h` or `1m30s`.
///
/// A bare number is read as seconds.
pub fn parse_timeout(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("empty duration".to_string());
    }
    if let Ok(secs) = value.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let invalid = || format!("invalid duration: {value}");
    let mut total = Duration::ZERO;
    let mut rest = value;

    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits == 0 {
            return Err(invalid());
        }
        let amount: u64 = rest[..digits].parse().map_err(|_| invalid())?;
        rest = &rest[digits..];

        let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];

        total += match unit {
            "ms" => Duration::from_millis(amount),
            "s" => Duration::from_secs(amount),
            "m" => Duration::from_secs(amount.saturating_mul(60)),
            "h" => Duration::from_secs(amount.saturating_mul(3600)),
            _ => return Err(invalid()),
        };
    }

    Ok(total)
}

/// Converts `--regex-exclude` values into exclusions. A value ending in
/// `-inverse` includes matching versions instead of excluding them.
pub fn parse_exclusions(values: &[String]) -> Vec<Exclusion> {
    values
        .iter()
        .map(|value| match value.strip_suffix(INVERSE_SUFFIX) {
            Some(stripped) => Exclusion {
                value: stripped.to_string(),
                inverse: true,
            },
            None => Exclusion {
                value: value.clone(),
                inverse: false,
            },
        })
        .collect()
}

/// Translates a value list flag and its `-remove` counterpart into a
/// partial update field.
///
/// `remove` wins and yields an empty list. Otherwise an empty list means the
/// flag was not given and the field stays unchanged.
pub fn list_option<T>(remove: bool, values: Vec<T>) -> Option<Vec<T>> {
    if remove {
        return Some(Vec::new());
    }
    if values.is_empty() {
        return None;
    }
    Some(values)
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

pub fn join(values: &[String]) -> String {
    values.join(", ")
}

pub fn format_release_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S %z")
        .to_string()
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

/// Awaits `future` while a spinner is drawn on stderr.
pub async fn with_spinner<F: Future>(message: &str, future: F) -> F::Output {
    let pb = spinner(message);
    let output = future.await;
    pb.finish_and_clear();
    output
}
