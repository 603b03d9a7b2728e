//! Command-line argument conversion: instants and `name=INSTANT` bindings.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use super::CliError;

const INSTANT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

static BINDING_RE: LazyLock<Regex> =
    LazyLock::new(
        || match Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(\S.*?)\s*$") {
            Ok(re) => re,
            Err(_) => unreachable!("static regex pattern"),
        },
    );

/// Parses a zone-naive instant such as `2014-08-01T02:10:23.000550`,
/// `2014-08-01 02:10` or a bare date (midnight).
pub fn parse_instant(text: &str) -> Result<NaiveDateTime, CliError> {
    let text = text.trim();
    INSTANT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| CliError::InvalidInstant(text.to_string()))
}

/// Parses a `--var` argument of the form `name=INSTANT`.
pub fn parse_binding(text: &str) -> Result<(String, NaiveDateTime), CliError> {
    let captures = BINDING_RE
        .captures(text)
        .ok_or_else(|| CliError::InvalidBinding(text.to_string()))?;
    let name = captures[1].to_string();
    let instant = parse_instant(&captures[2])?;
    Ok((name, instant))
}
