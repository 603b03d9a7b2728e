//! Documentation content for timex CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Durations,
    Operators,
    Functions,
    Pinning,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "durations" | "duration" | "units" => Some(Self::Durations),
            "operators" | "ops" => Some(Self::Operators),
            "functions" | "function" | "buckets" => Some(Self::Functions),
            "pinning" | "pinned" | "pinned_ranges" => Some(Self::Pinning),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"TIMEX DOCUMENTATION

Timex is a mini-language for deriving timestamps and date ranges from named
datetimes, much like regular expressions do for strings. Expressions are
evaluated against variables such as $event; $timestamp defaults to now.

DOCUMENTATION CATEGORIES

  syntax            Variables, ranges, parentheses and precedence
  durations         Units, combined durations and unit-less numbers
  operators         Shifting (+, -) and field assignment (@)
  functions         hour, day, month and year ranges
  pinning           How bucket ranges stay anchored after a shift

QUICK REFERENCE

  $name             Variable (a point in time)
  $a to $b          Range from $a (inclusive) to $b (exclusive)
  day($a)           The calendar day containing $a
  day               The calendar day containing $timestamp
  + 1d 2h           Shift forward
  - 30m             Shift backward
  @ 6h              Set the hour field

Run 'timex doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Durations) => Ok(DURATIONS_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Functions) => Ok(FUNCTIONS_DOC),
        Some(DocCategory::Pinning) => Ok(PINNING_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX

VARIABLES
  $name             The instant bound to "name"
  $timestamp        Defaults to the current UTC time when not supplied

RANGES
  $a to $b          Half-open range: includes $a, excludes $b
  day($a)           Range function applied to a point
  day               Range function applied to $timestamp

PRECEDENCE (loosest first)
  to                $a to $b + 1d   ==   $a to ($b + 1d)
  + -               left to right
  @                 left to right
  $

  Parentheses group explicitly: ($a to $b) + 1d

Both sides of 'to' and the argument of a range function must be points:
'day($a) to $b' is a parse error.
"#;

const DURATIONS_DOC: &str = r#"DURATIONS

UNITS
  us                microseconds
  s, sec            seconds
  m, min            minutes
  h, hr             hours
  d                 days
  mo                months
  y, yr             years

Adjacent durations add up:   $a + 1d 2h 30m

UNIT-LESS NUMBERS
  A bare number takes its unit from the length of the range it applies to:

  range length >= 365 days    months
  range length >= 28 days     days
  range length >= 1 day       hours
  range length >= 1 hour      minutes
  range length >= 1 minute    seconds
  shorter                     microseconds

  day @ 2           2 o'clock (the range is one day long)

  Unit-less numbers must follow a range or range function directly:
  '$a + 2' and 'day + 6h @ 2' are parse errors.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

  +  duration       Shift forward
  -  duration       Shift backward
  @  duration       Assign calendar fields

SHIFTING
  Days, hours, minutes, seconds and microseconds are fixed lengths. Months
  and years move the calendar fields, carrying month overflow into the year:

  $a + 6mo          2014-08-01 -> 2015-02-01
  $a - 1mo          2014-01-10 -> 2013-12-10

  A shift that lands on a day the month does not have (January 31 + 1mo)
  is an error.

ASSIGNMENT
  $a @ 6h           Same day, hour set to 6
  $a @ 2017y        Same date in 2017
  $a @ 0h 0m 0s 0us Midnight of the same day

On a range, every operator applies to both ends.
"#;

const FUNCTIONS_DOC: &str = r#"RANGE FUNCTIONS

  hour($a)          [start of the hour, start of the next hour)
  day($a)           [midnight, next midnight)
  month($a)         [the 1st, the 1st of next month)
  year($a)          [January 1st, next January 1st)

Without an argument they apply to $timestamp:

  day               The day containing now (or --at)

Embedding programs may register additional range functions.
"#;

const PINNING_DOC: &str = r#"PINNING

Ranges produced by range functions remember the instant they were built
from. Shifting such a range by less than its unit keeps that instant inside:
the shifted range slides back or forward by whole lengths until it contains
the instant again.

  timestamp = 2014-08-01T02:10:23

  day               [2014-08-01T00:00, 2014-08-02T00:00)
  day + 6h          [2014-07-31T06:00, 2014-08-01T06:00)
  day @ 6h          [2014-07-31T06:00, 2014-08-01T06:00)

Shifting by a whole unit or more moves the range for real and drops the
pin:

  day + 1d          [2014-08-02T00:00, 2014-08-03T00:00)
"#;
