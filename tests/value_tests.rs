// tests/value_tests.rs

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use timex::duration::{Duration, TimeUnit};
use timex::environment::bucket;
use timex::{ExpressionError, PinnedTimeRange, TimeMatcher, TimeOps, TimeRange, Timestamp};

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, us: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_micro_opt(h, mi, s, us))
        .unwrap()
}

fn sample() -> NaiveDateTime {
    dt(2014, 8, 1, 2, 10, 23, 550)
}

fn day_hour(d: u32, h: u32) -> NaiveDateTime {
    dt(2014, 8, d, h, 0, 0, 0)
}

fn one_day_one_hour() -> Duration {
    Duration::of(TimeUnit::Day, 1).with(TimeUnit::Hour, 2)
}

// ============================================================================
// Timestamp
// ============================================================================

#[test]
fn test_timestamp_matches_only_itself() {
    let ts = Timestamp::new(sample());
    assert!(ts.matches(sample()));
    assert!(!ts.matches(dt(2014, 8, 1, 2, 10, 23, 551)));
}

#[test]
fn test_timestamp_add() {
    let result = Timestamp::new(sample()).add(&one_day_one_hour()).unwrap();
    assert_eq!(result, TimeMatcher::from(Timestamp::new(dt(2014, 8, 2, 4, 10, 23, 550))));
}

#[test]
fn test_timestamp_sub() {
    let result = Timestamp::new(sample()).sub(&one_day_one_hour()).unwrap();
    assert_eq!(result.timestamp(), dt(2014, 7, 31, 0, 10, 23, 550));
}

#[test]
fn test_timestamp_replace() {
    let duration = Duration::of(TimeUnit::Day, 7).with(TimeUnit::Hour, 6);
    let result = Timestamp::new(sample()).replace(&duration).unwrap();
    assert_eq!(result.timestamp(), dt(2014, 8, 7, 6, 10, 23, 550));
}

#[test]
fn test_timestamp_rejects_unitless_duration() {
    let ts = Timestamp::new(sample());
    let result = ts.add(&Duration::ambiguous(2));
    assert!(matches!(result, Err(ExpressionError::InvalidDuration(_))));
}

#[test]
fn test_timestamp_is_a_point() {
    let value = TimeMatcher::from(Timestamp::new(sample()));
    assert!(!value.is_range());
    assert_eq!(value.begin(), value.end());
    assert_eq!(value.total_seconds(), Decimal::ZERO);
    assert!(value.as_range().is_none());
}

// ============================================================================
// TimeRange
// ============================================================================

#[test]
fn test_range_is_half_open() {
    let range = TimeRange::new(day_hour(1, 0), day_hour(2, 0));
    assert!(range.matches(day_hour(1, 0)));
    assert!(range.matches(sample()));
    assert!(!range.matches(day_hour(2, 0)));
    assert!(!range.matches(dt(2014, 7, 31, 23, 59, 59, 999_999)));
}

#[test]
fn test_negative_range_matches_nothing() {
    let range = TimeRange::new(day_hour(2, 0), day_hour(1, 0));
    assert!(!range.matches(day_hour(1, 12)));
    assert!(!range.matches(day_hour(2, 0)));
    assert!(!range.matches(day_hour(1, 0)));
}

#[test]
fn test_range_add_applies_to_both_ends() {
    let range = TimeRange::new(sample(), day_hour(3, 0));
    let result = range.add(&one_day_one_hour()).unwrap();
    assert_eq!(result.begin(), dt(2014, 8, 2, 4, 10, 23, 550));
    assert_eq!(result.end(), day_hour(4, 2));
}

#[test]
fn test_range_sub_applies_to_both_ends() {
    let range = TimeRange::new(sample(), day_hour(3, 0));
    let result = range.sub(&one_day_one_hour()).unwrap();
    assert_eq!(result.begin(), dt(2014, 7, 31, 0, 10, 23, 550));
    assert_eq!(result.end(), day_hour(1, 22));
}

#[test]
fn test_range_replace_applies_to_both_ends() {
    let range = TimeRange::new(sample(), day_hour(3, 0));
    let result = range.replace(&Duration::of(TimeUnit::Hour, 6)).unwrap();
    assert_eq!(result.begin(), dt(2014, 8, 1, 6, 10, 23, 550));
    assert_eq!(result.end(), day_hour(3, 6));
}

#[test]
fn test_range_resolves_unitless_duration() {
    let range = TimeRange::new(day_hour(1, 0), day_hour(2, 0));
    let result = range.add(&Duration::ambiguous(2)).unwrap();
    assert_eq!(result, TimeMatcher::from(TimeRange::new(day_hour(1, 2), day_hour(2, 2))));
}

#[test]
fn test_range_total_seconds() {
    let range = TimeRange::new(sample(), dt(2014, 8, 1, 2, 10, 25, 50));
    assert_eq!(range.total_seconds(), Decimal::new(1_999_500, 6));

    let reversed = TimeRange::new(day_hour(2, 0), day_hour(1, 12));
    assert_eq!(reversed.total_seconds(), Decimal::from(-43_200));
}

#[test]
fn test_range_next_and_prev() {
    let range = TimeRange::new(day_hour(1, 0), day_hour(1, 6));
    assert_eq!(range.next().unwrap(), TimeRange::new(day_hour(1, 6), day_hour(1, 12)));
    assert_eq!(
        range.prev().unwrap(),
        TimeRange::new(dt(2014, 7, 31, 18, 0, 0, 0), day_hour(1, 0))
    );
}

#[test]
fn test_range_display() {
    let range = TimeRange::new(day_hour(1, 0), day_hour(2, 0));
    assert_eq!(range.to_string(), "[2014-08-01 00:00:00, 2014-08-02 00:00:00)");
}

// ============================================================================
// PinnedTimeRange
// ============================================================================

fn pinned_day() -> PinnedTimeRange {
    bucket(sample(), TimeUnit::Day).unwrap()
}

#[test]
fn test_bucket_day() {
    let day = pinned_day();
    assert_eq!(day.range, TimeRange::new(day_hour(1, 0), day_hour(2, 0)));
    assert_eq!(day.pinned_to, sample());
    assert_eq!(day.unit, TimeUnit::Day);
    assert_eq!(day.unit_duration(), Duration::of(TimeUnit::Day, 1));
}

#[test]
fn test_bucket_hour_month_year() {
    let hour = bucket(sample(), TimeUnit::Hour).unwrap();
    assert_eq!(hour.range, TimeRange::new(day_hour(1, 2), day_hour(1, 3)));

    let month = bucket(sample(), TimeUnit::Month).unwrap();
    assert_eq!(month.range, TimeRange::new(day_hour(1, 0), dt(2014, 9, 1, 0, 0, 0, 0)));

    let year = bucket(sample(), TimeUnit::Year).unwrap();
    assert_eq!(
        year.range,
        TimeRange::new(dt(2014, 1, 1, 0, 0, 0, 0), dt(2015, 1, 1, 0, 0, 0, 0))
    );
}

#[test]
fn test_pinned_add_slides_back_over_pin() {
    let result = pinned_day().add(&Duration::of(TimeUnit::Hour, 6)).unwrap();
    let expected = PinnedTimeRange::new(
        dt(2014, 7, 31, 6, 0, 0, 0),
        day_hour(1, 6),
        sample(),
        TimeUnit::Day,
    );
    assert_eq!(result, TimeMatcher::from(expected));
    assert!(result.matches(sample()));
}

#[test]
fn test_pinned_replace_slides_back_over_pin() {
    let result = pinned_day().replace(&Duration::of(TimeUnit::Hour, 6)).unwrap();
    assert_eq!(result.begin(), dt(2014, 7, 31, 6, 0, 0, 0));
    assert_eq!(result.end(), day_hour(1, 6));
}

#[test]
fn test_pinned_sub_keeps_range_containing_pin() {
    let result = pinned_day().sub(&Duration::of(TimeUnit::Hour, 6)).unwrap();
    assert_eq!(result.begin(), dt(2014, 7, 31, 18, 0, 0, 0));
    assert_eq!(result.end(), day_hour(1, 18));
}

#[test]
fn test_pinned_sub_slides_forward_over_pin() {
    let evening = dt(2014, 8, 1, 19, 45, 30, 225);
    let day = bucket(evening, TimeUnit::Day).unwrap();
    let result = day.sub(&Duration::of(TimeUnit::Hour, 6)).unwrap();
    assert_eq!(result.begin(), day_hour(1, 18));
    assert_eq!(result.end(), day_hour(2, 18));
    assert!(result.matches(evening));
}

#[test]
fn test_pinned_unitless_replace() {
    let result = pinned_day().replace(&Duration::ambiguous(2)).unwrap();
    assert_eq!(result.begin(), day_hour(1, 2));
    assert_eq!(result.end(), day_hour(2, 2));
}

#[test]
fn test_pinned_shift_by_whole_unit_unpins() {
    let result = pinned_day().add(&Duration::of(TimeUnit::Day, 1)).unwrap();
    assert_eq!(
        result,
        TimeMatcher::from(TimeRange::new(day_hour(2, 0), day_hour(3, 0)))
    );
    assert!(!result.matches(sample()));
}

#[test]
fn test_pinned_shift_by_more_than_unit_unpins() {
    let duration = Duration::of(TimeUnit::Day, 1).with(TimeUnit::Hour, 1);
    let result = pinned_day().sub(&duration).unwrap();
    assert!(matches!(result, TimeMatcher::Range(_)));
    assert_eq!(result.begin(), dt(2014, 7, 30, 23, 0, 0, 0));
}

#[test]
fn test_pinned_hour_shift() {
    let hour = bucket(sample(), TimeUnit::Hour).unwrap();
    let result = hour.add(&Duration::of(TimeUnit::Minute, 30)).unwrap();
    assert_eq!(result.begin(), dt(2014, 8, 1, 1, 30, 0, 0));
    assert_eq!(result.end(), dt(2014, 8, 1, 2, 30, 0, 0));
}

#[test]
fn test_pinned_month_unitless_shift() {
    let month = bucket(sample(), TimeUnit::Month).unwrap();
    let result = month.add(&Duration::ambiguous(2)).unwrap();
    assert_eq!(result.begin(), dt(2014, 7, 3, 0, 0, 0, 0));
    assert_eq!(result.end(), day_hour(3, 0));
    assert!(result.matches(sample()));
}

#[test]
fn test_pinned_result_stays_pinned() {
    let result = pinned_day().add(&Duration::of(TimeUnit::Hour, 6)).unwrap();
    let again = result.add(&Duration::of(TimeUnit::Hour, 6)).unwrap();
    assert_eq!(again.begin(), day_hour(1, 0) - chrono::TimeDelta::hours(12));
    assert!(again.matches(sample()));
}

#[test]
fn test_pinned_collapsed_range_cannot_be_pinned() {
    let pinned = PinnedTimeRange::new(day_hour(1, 0), day_hour(1, 6), day_hour(1, 3), TimeUnit::Day);
    let result = pinned.replace(&Duration::of(TimeUnit::Hour, 12));
    assert!(matches!(result, Err(ExpressionError::UnpinnableRange(_))));
}
