use chrono::{NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use tracing::trace;

use crate::calendar;
use crate::duration::{Duration, TimeUnit};
use crate::evaluator::ExpressionError;

/// Operations every evaluated time value supports.
///
/// `add`, `sub` and `replace` never modify the receiver; they return a new
/// value, which may be of a different kind (a pinned range shifted by more
/// than its unit comes back as a plain [`TimeRange`]).
pub trait TimeOps {
    /// Does `instant` fall within this value?
    fn matches(&self, instant: NaiveDateTime) -> bool;

    fn add(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError>;

    fn sub(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError>;

    /// Field assignment (`@` in the expression language).
    fn replace(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError>;
}

/// The result of evaluating a time expression.
///
/// Every variant exposes the same interface: a `begin`, an `end`, a
/// `timestamp` (the begin), a signed length and a membership test.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use timex::{TimeMatcher, TimeOps, TimeRange};
///
/// let begin = NaiveDate::from_ymd_opt(2014, 8, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let end = NaiveDate::from_ymd_opt(2014, 8, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let matcher = TimeMatcher::from(TimeRange::new(begin, end));
///
/// assert!(matcher.is_range());
/// assert!(matcher.matches(begin));
/// assert!(!matcher.matches(end));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeMatcher {
    Timestamp(Timestamp),
    Range(TimeRange),
    Pinned(PinnedTimeRange),
}

impl TimeMatcher {
    pub fn begin(&self) -> NaiveDateTime {
        match self {
            TimeMatcher::Timestamp(t) => t.timestamp,
            TimeMatcher::Range(r) => r.begin,
            TimeMatcher::Pinned(p) => p.range.begin,
        }
    }

    pub fn end(&self) -> NaiveDateTime {
        match self {
            TimeMatcher::Timestamp(t) => t.timestamp,
            TimeMatcher::Range(r) => r.end,
            TimeMatcher::Pinned(p) => p.range.end,
        }
    }

    /// Alias for [`TimeMatcher::begin`].
    pub fn timestamp(&self) -> NaiveDateTime {
        self.begin()
    }

    pub fn is_range(&self) -> bool {
        !matches!(self, TimeMatcher::Timestamp(_))
    }

    /// Signed length in seconds, exact to the microsecond. Always zero for a
    /// timestamp.
    pub fn total_seconds(&self) -> Decimal {
        match self {
            TimeMatcher::Timestamp(_) => Decimal::ZERO,
            TimeMatcher::Range(r) => r.total_seconds(),
            TimeMatcher::Pinned(p) => p.range.total_seconds(),
        }
    }

    /// The range view of this value, if it is one.
    pub fn as_range(&self) -> Option<&TimeRange> {
        match self {
            TimeMatcher::Timestamp(_) => None,
            TimeMatcher::Range(r) => Some(r),
            TimeMatcher::Pinned(p) => Some(&p.range),
        }
    }

    fn ops(&self) -> &dyn TimeOps {
        match self {
            TimeMatcher::Timestamp(t) => t,
            TimeMatcher::Range(r) => r,
            TimeMatcher::Pinned(p) => p,
        }
    }
}

impl TimeOps for TimeMatcher {
    fn matches(&self, instant: NaiveDateTime) -> bool {
        self.ops().matches(instant)
    }

    fn add(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError> {
        self.ops().add(duration)
    }

    fn sub(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError> {
        self.ops().sub(duration)
    }

    fn replace(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError> {
        self.ops().replace(duration)
    }
}

impl From<Timestamp> for TimeMatcher {
    fn from(t: Timestamp) -> Self {
        TimeMatcher::Timestamp(t)
    }
}

impl From<TimeRange> for TimeMatcher {
    fn from(r: TimeRange) -> Self {
        TimeMatcher::Range(r)
    }
}

impl From<PinnedTimeRange> for TimeMatcher {
    fn from(p: PinnedTimeRange) -> Self {
        TimeMatcher::Pinned(p)
    }
}

/// A single instant. Matches only itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub timestamp: NaiveDateTime,
}

impl Timestamp {
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Timestamp { timestamp }
    }

    /// Points cannot decide what unit a bare number means.
    fn check_duration(duration: &Duration) -> Result<(), ExpressionError> {
        if duration.is_ambiguous() {
            return Err(ExpressionError::InvalidDuration(format!(
                "'{duration}' needs a unit when applied to a timestamp"
            )));
        }
        Ok(())
    }
}

impl TimeOps for Timestamp {
    fn matches(&self, instant: NaiveDateTime) -> bool {
        self.timestamp == instant
    }

    fn add(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError> {
        Self::check_duration(duration)?;
        Ok(Timestamp::new(calendar::add(self.timestamp, duration)?).into())
    }

    fn sub(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError> {
        Self::check_duration(duration)?;
        Ok(Timestamp::new(calendar::sub(self.timestamp, duration)?).into())
    }

    fn replace(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError> {
        Self::check_duration(duration)?;
        Ok(Timestamp::new(calendar::replace(self.timestamp, duration)?).into())
    }
}

/// A half-open interval `[begin, end)`.
///
/// `begin` may be later than `end`; such a range has a negative length and
/// matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(begin: NaiveDateTime, end: NaiveDateTime) -> Self {
        TimeRange { begin, end }
    }

    /// Signed `end - begin`.
    pub fn length(&self) -> TimeDelta {
        self.end - self.begin
    }

    pub fn total_seconds(&self) -> Decimal {
        let length = self.length();
        Decimal::from(length.num_seconds())
            + Decimal::new(i64::from(length.subsec_nanos() / 1_000), 6)
    }

    /// True when the range has no positive length.
    pub fn is_empty(&self) -> bool {
        self.length() <= TimeDelta::zero()
    }

    /// Alias for [`TimeOps::matches`].
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.matches(instant)
    }

    /// The range of equal length starting where this one ends.
    pub fn next(&self) -> Result<TimeRange, ExpressionError> {
        self.slide(1)
    }

    /// The range of equal length ending where this one begins.
    pub fn prev(&self) -> Result<TimeRange, ExpressionError> {
        self.slide(-1)
    }

    /// Moves the range by `steps` times its own length.
    fn slide(&self, steps: i64) -> Result<TimeRange, ExpressionError> {
        let out_of_range =
            || ExpressionError::InvalidDate(format!("{self} slid by {steps} lengths"));
        let length = self.length();
        let offset = length
            .num_microseconds()
            .and_then(|micros| micros.checked_mul(steps))
            .map(TimeDelta::microseconds)
            .ok_or_else(out_of_range)?;
        let begin = self.begin.checked_add_signed(offset).ok_or_else(out_of_range)?;
        let end = self.end.checked_add_signed(offset).ok_or_else(out_of_range)?;
        Ok(TimeRange::new(begin, end))
    }

    /// Anchors this range to `instant` at the granularity of `unit`.
    pub fn pin(self, instant: NaiveDateTime, unit: TimeUnit) -> PinnedTimeRange {
        PinnedTimeRange {
            range: self,
            pinned_to: instant,
            unit,
        }
    }

    fn shifted(
        &self,
        duration: &Duration,
        apply: fn(NaiveDateTime, &Duration) -> Result<NaiveDateTime, ExpressionError>,
    ) -> Result<TimeRange, ExpressionError> {
        let duration = duration.in_context(self)?;
        Ok(TimeRange::new(
            apply(self.begin, &duration)?,
            apply(self.end, &duration)?,
        ))
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}

impl TimeOps for TimeRange {
    fn matches(&self, instant: NaiveDateTime) -> bool {
        self.begin <= instant && instant < self.end
    }

    fn add(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError> {
        Ok(self.shifted(duration, calendar::add)?.into())
    }

    fn sub(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError> {
        Ok(self.shifted(duration, calendar::sub)?.into())
    }

    fn replace(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError> {
        Ok(self.shifted(duration, calendar::replace)?.into())
    }
}

/// A range that must keep containing `pinned_to`.
///
/// Bucket functions such as `day` produce these. Shifting one by less than
/// its unit moves the range but then slides it by whole lengths until the
/// pinned instant is inside again, so `day + 6h` is "the six-in-the-morning
/// day that contains the timestamp", not the following one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinnedTimeRange {
    pub range: TimeRange,
    pub pinned_to: NaiveDateTime,
    pub unit: TimeUnit,
}

impl PinnedTimeRange {
    pub fn new(
        begin: NaiveDateTime,
        end: NaiveDateTime,
        pinned_to: NaiveDateTime,
        unit: TimeUnit,
    ) -> Self {
        TimeRange::new(begin, end).pin(pinned_to, unit)
    }

    /// One of this range's unit, e.g. `1 day` for a `day` bucket.
    pub fn unit_duration(&self) -> Duration {
        Duration::of(self.unit, 1)
    }

    /// Slides `range` by whole lengths until it contains the pinned instant.
    fn pin_adjust(&self, range: TimeRange) -> Result<TimeMatcher, ExpressionError> {
        if range.contains(self.pinned_to) {
            return Ok(range.pin(self.pinned_to, self.unit).into());
        }
        let too_far = || {
            ExpressionError::InvalidDate(format!("{range} is too far from {}", self.pinned_to))
        };
        let length = range.length().num_microseconds().ok_or_else(too_far)?;
        if length <= 0 {
            return Err(ExpressionError::UnpinnableRange(format!(
                "{range} cannot be moved to contain {}",
                self.pinned_to
            )));
        }
        let offset = (self.pinned_to - range.begin)
            .num_microseconds()
            .ok_or_else(too_far)?;
        let steps = offset.div_euclid(length);
        trace!(%range, steps, pinned_to = %self.pinned_to, "re-anchoring pinned range");
        Ok(range.slide(steps)?.pin(self.pinned_to, self.unit).into())
    }

    fn apply(
        &self,
        duration: &Duration,
        shifted: Result<TimeMatcher, ExpressionError>,
    ) -> Result<TimeMatcher, ExpressionError> {
        let range = match shifted? {
            TimeMatcher::Range(range) => range,
            other => return Ok(other),
        };
        if *duration < self.unit_duration() {
            self.pin_adjust(range)
        } else {
            // A shift of a whole unit or more moves the range on purpose.
            Ok(range.into())
        }
    }
}

impl TimeOps for PinnedTimeRange {
    fn matches(&self, instant: NaiveDateTime) -> bool {
        self.range.matches(instant)
    }

    fn add(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError> {
        self.apply(duration, self.range.add(duration))
    }

    fn sub(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError> {
        self.apply(duration, self.range.sub(duration))
    }

    fn replace(&self, duration: &Duration) -> Result<TimeMatcher, ExpressionError> {
        self.apply(duration, self.range.replace(duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2014, 8, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_slide_preserves_length() {
        let range = TimeRange::new(dt(1, 0), dt(1, 6));
        assert_eq!(range.next().unwrap(), TimeRange::new(dt(1, 6), dt(1, 12)));
        assert_eq!(range.prev().unwrap(), TimeRange::new(dt(1, 0) - TimeDelta::hours(6), dt(1, 0)));
    }

    #[test]
    fn test_pin_adjust_jumps_many_lengths() {
        let pinned = PinnedTimeRange::new(dt(1, 0), dt(1, 1), dt(1, 0), TimeUnit::Hour);
        let far = TimeRange::new(dt(20, 0), dt(20, 1));
        let adjusted = pinned.pin_adjust(far).unwrap();
        assert_eq!(adjusted.begin(), dt(1, 0));
        assert_eq!(adjusted.end(), dt(1, 1));
    }

    #[test]
    fn test_pin_adjust_rejects_empty_range() {
        let pinned = PinnedTimeRange::new(dt(1, 2), dt(1, 3), dt(1, 2), TimeUnit::Hour);
        let collapsed = TimeRange::new(dt(1, 0), dt(1, 0));
        assert!(matches!(
            pinned.pin_adjust(collapsed),
            Err(ExpressionError::UnpinnableRange(_))
        ));
    }

    #[test]
    fn test_pin_adjust_rejects_unmeasurable_range() {
        let year = |y: i32| {
            NaiveDate::from_ymd_opt(y, 1, 1)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .unwrap()
        };
        let pinned = PinnedTimeRange::new(dt(1, 0), dt(2, 0), year(200_000), TimeUnit::Day);
        // 350,000 years does not fit in i64 microseconds.
        let huge = TimeRange::new(year(-250_000), year(100_000));
        assert!(matches!(
            pinned.pin_adjust(huge),
            Err(ExpressionError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_negative_length_total_seconds() {
        let range = TimeRange::new(dt(2, 0), dt(1, 0));
        assert_eq!(range.total_seconds(), Decimal::from(-86_400));
        assert!(range.is_empty());
    }
}
