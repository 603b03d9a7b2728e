//! JSON output for evaluated time expressions.
//!
//! Instants are written as ISO 8601 without an offset
//! (`2014-08-01T02:10:23.000550`), since every instant in the language is
//! zone-naive. `total_seconds` is a string so no precision is lost.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use timex::{TimeMatcher, Timestamp};
//! use timex::output::to_json;
//!
//! let at = NaiveDate::from_ymd_opt(2014, 8, 1).unwrap().and_hms_opt(2, 10, 23).unwrap();
//! let value = TimeMatcher::from(Timestamp::new(at));
//!
//! assert_eq!(
//!     to_json(&value),
//!     r#"{"begin":"2014-08-01T02:10:23","end":"2014-08-01T02:10:23","is_range":false,"kind":"timestamp","total_seconds":"0"}"#
//! );
//! ```

use chrono::NaiveDateTime;
use serde_json::{Map, Value, json};

use crate::value::TimeMatcher;

const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Formats an instant the way JSON output does.
pub fn format_instant(instant: NaiveDateTime) -> String {
    instant.format(INSTANT_FORMAT).to_string()
}

/// Converts an evaluated expression into a JSON object.
pub fn matcher_to_json(matcher: &TimeMatcher) -> Value {
    let kind = match matcher {
        TimeMatcher::Timestamp(_) => "timestamp",
        TimeMatcher::Range(_) => "range",
        TimeMatcher::Pinned(_) => "pinned_range",
    };

    let mut object = Map::new();
    object.insert("kind".into(), json!(kind));
    object.insert("begin".into(), json!(format_instant(matcher.begin())));
    object.insert("end".into(), json!(format_instant(matcher.end())));
    object.insert("is_range".into(), json!(matcher.is_range()));
    object.insert(
        "total_seconds".into(),
        json!(matcher.total_seconds().normalize().to_string()),
    );
    if let TimeMatcher::Pinned(pinned) = matcher {
        object.insert("pinned_to".into(), json!(format_instant(pinned.pinned_to)));
        object.insert("unit".into(), json!(pinned.unit.name()));
    }
    Value::Object(object)
}

/// Compact JSON for `matcher`.
pub fn to_json(matcher: &TimeMatcher) -> String {
    matcher_to_json(matcher).to_string()
}

/// Pretty-printed JSON for `matcher`, two-space indented.
pub fn to_json_pretty(matcher: &TimeMatcher) -> String {
    let value = matcher_to_json(matcher);
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}
