//! Durations as written in time expressions.
//!
//! A [`Duration`] is sparse: every [`TimeUnit`] either carries a count or is
//! absent. `1d 2h` has a day and an hour count and nothing else. A bare number
//! such as the `2` in `day @ 2` has no unit at all; it is stored in the
//! `unknown` slot and resolved later against the range it is applied to (see
//! [`Duration::in_context`]).

use std::cmp::Ordering;
use std::fmt;

use chrono::TimeDelta;

use crate::evaluator::ExpressionError;
use crate::value::TimeRange;

/// Calendar units a duration can be expressed in, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Microsecond,
}

impl TimeUnit {
    /// All units ordered from coarsest to finest.
    pub const ALL: [TimeUnit; 7] = [
        TimeUnit::Year,
        TimeUnit::Month,
        TimeUnit::Day,
        TimeUnit::Hour,
        TimeUnit::Minute,
        TimeUnit::Second,
        TimeUnit::Microsecond,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TimeUnit::Year => "year",
            TimeUnit::Month => "month",
            TimeUnit::Day => "day",
            TimeUnit::Hour => "hour",
            TimeUnit::Minute => "minute",
            TimeUnit::Second => "second",
            TimeUnit::Microsecond => "microsecond",
        }
    }

    /// Maps a reserved unit keyword (`h`, `hr`, `mo`, ...) to its unit.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "us" => Some(TimeUnit::Microsecond),
            "s" | "sec" => Some(TimeUnit::Second),
            "m" | "min" => Some(TimeUnit::Minute),
            "h" | "hr" => Some(TimeUnit::Hour),
            "d" => Some(TimeUnit::Day),
            "mo" => Some(TimeUnit::Month),
            "y" | "yr" => Some(TimeUnit::Year),
            _ => None,
        }
    }

    /// Approximate length of one unit, used only to pick a unit for
    /// ambiguous durations. Months are 28 days and years 365.
    fn approximate_length(self) -> TimeDelta {
        match self {
            TimeUnit::Year => TimeDelta::seconds(365 * 24 * 60 * 60),
            TimeUnit::Month => TimeDelta::seconds(28 * 24 * 60 * 60),
            TimeUnit::Day => TimeDelta::seconds(24 * 60 * 60),
            TimeUnit::Hour => TimeDelta::seconds(60 * 60),
            TimeUnit::Minute => TimeDelta::seconds(60),
            TimeUnit::Second => TimeDelta::seconds(1),
            TimeUnit::Microsecond => TimeDelta::microseconds(1),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A sparse per-unit duration, optionally carrying an unresolved count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Duration {
    counts: [Option<i64>; 7],
    unknown: Option<i64>,
}

impl Duration {
    /// A duration with no unit present.
    pub fn new() -> Self {
        Self::default()
    }

    /// A duration of `count` in a single unit.
    pub fn of(unit: TimeUnit, count: i64) -> Self {
        Self::new().with(unit, count)
    }

    /// A bare count whose unit is decided by the range it is applied to.
    pub fn ambiguous(count: i64) -> Self {
        Duration {
            counts: [None; 7],
            unknown: Some(count),
        }
    }

    /// Returns a copy with `unit` set to `count`, replacing any previous count.
    pub fn with(mut self, unit: TimeUnit, count: i64) -> Self {
        self.counts[unit as usize] = Some(count);
        self
    }

    pub fn get(&self, unit: TimeUnit) -> Option<i64> {
        self.counts[unit as usize]
    }

    pub fn unknown(&self) -> Option<i64> {
        self.unknown
    }

    pub fn is_ambiguous(&self) -> bool {
        self.unknown.is_some()
    }

    /// True when neither a unit nor an unknown count is present.
    pub fn is_empty(&self) -> bool {
        self.unknown.is_none() && self.counts.iter().all(Option::is_none)
    }

    /// Present units with their counts, coarsest first.
    pub fn units(&self) -> impl Iterator<Item = (TimeUnit, i64)> + '_ {
        TimeUnit::ALL
            .into_iter()
            .filter_map(|unit| self.get(unit).map(|count| (unit, count)))
    }

    /// Resolves an ambiguous duration against the length of `range`.
    ///
    /// The unknown count is folded into the unit one step finer than the
    /// coarsest unit the range spans: a one-day range turns `2` into two
    /// hours, a one-year range turns it into two months. Ranges shorter than a
    /// minute resolve to microseconds. Non-ambiguous durations are returned
    /// unchanged. Fails when the folded count no longer fits in an `i64`.
    pub fn in_context(&self, range: &TimeRange) -> Result<Duration, ExpressionError> {
        let Some(unknown) = self.unknown else {
            return Ok(*self);
        };
        let length = range.length().abs();
        let unit = [
            (TimeUnit::Year, TimeUnit::Month),
            (TimeUnit::Month, TimeUnit::Day),
            (TimeUnit::Day, TimeUnit::Hour),
            (TimeUnit::Hour, TimeUnit::Minute),
            (TimeUnit::Minute, TimeUnit::Second),
        ]
        .into_iter()
        .find(|(threshold, _)| length >= threshold.approximate_length())
        .map_or(TimeUnit::Microsecond, |(_, unit)| unit);

        let count = self
            .get(unit)
            .unwrap_or(0)
            .checked_add(unknown)
            .ok_or_else(|| ExpressionError::InvalidDate(format!("'{self}' overflows as {unit}s")))?;
        let mut resolved = *self;
        resolved.unknown = None;
        resolved.counts[unit as usize] = Some(count);
        Ok(resolved)
    }

    /// Per-unit sum, absent units staying absent. `None` on overflow.
    pub fn checked_add(self, other: Duration) -> Option<Duration> {
        let mut counts = [None; 7];
        for (slot, (ours, theirs)) in counts
            .iter_mut()
            .zip(self.counts.iter().zip(other.counts.iter()))
        {
            *slot = sum(*ours, *theirs)?;
        }
        Some(Duration {
            counts,
            unknown: sum(self.unknown, other.unknown)?,
        })
    }

    /// Compares unit by unit from year down to microsecond.
    ///
    /// A unit present on one side only makes that side greater; a unit
    /// present on both sides with different counts decides numerically. The
    /// unknown count takes no part in the comparison.
    pub fn cmp_units(&self, other: &Duration) -> Ordering {
        for unit in TimeUnit::ALL {
            match (self.get(unit), other.get(unit)) {
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (Some(ours), Some(theirs)) if ours != theirs => return ours.cmp(&theirs),
                _ => {}
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.cmp_units(other) {
            // Same units but a different unknown count: unordered.
            Ordering::Equal if self != other => None,
            ordering => Some(ordering),
        }
    }
}

/// Outer `None` means the counts overflowed.
fn sum(a: Option<i64>, b: Option<i64>) -> Option<Option<i64>> {
    match (a, b) {
        (Some(a), Some(b)) => a.checked_add(b).map(Some),
        (a, None) => Some(a),
        (None, b) => Some(b),
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .units()
            .map(|(unit, count)| format!("{count} {unit}"))
            .collect();
        if let Some(unknown) = self.unknown {
            parts.push(unknown.to_string());
        }
        if parts.is_empty() {
            f.write_str("0")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}
