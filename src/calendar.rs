//! Calendar-aware arithmetic on single instants.
//!
//! Days and everything finer are fixed-length and applied as one
//! [`TimeDelta`]. Months and years are applied to the calendar fields, with
//! month overflow carried into the year.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::duration::{Duration, TimeUnit};
use crate::evaluator::ExpressionError;

/// Adds `duration` to `instant`.
pub fn add(instant: NaiveDateTime, duration: &Duration) -> Result<NaiveDateTime, ExpressionError> {
    shift(instant, duration, 1)
}

/// Subtracts `duration` from `instant`.
pub fn sub(instant: NaiveDateTime, duration: &Duration) -> Result<NaiveDateTime, ExpressionError> {
    shift(instant, duration, -1)
}

fn shift(
    instant: NaiveDateTime,
    duration: &Duration,
    sign: i64,
) -> Result<NaiveDateTime, ExpressionError> {
    let overflow = || ExpressionError::InvalidDate(format!("{instant} shifted by {duration}"));

    let delta = fixed_delta(duration, sign).ok_or_else(overflow)?;
    let mut instant = instant.checked_add_signed(delta).ok_or_else(overflow)?;

    let months = calendar_count(duration, TimeUnit::Month, sign).ok_or_else(overflow)?;
    let years = calendar_count(duration, TimeUnit::Year, sign).ok_or_else(overflow)?;
    if months == 0 && years == 0 {
        return Ok(instant);
    }

    let (year, month) =
        carry_months(i64::from(instant.year()), i64::from(instant.month()), months, years)
            .ok_or_else(overflow)?;
    instant = with_year_month(instant, year, month)?;
    Ok(instant)
}

fn calendar_count(duration: &Duration, unit: TimeUnit, sign: i64) -> Option<i64> {
    duration.get(unit).unwrap_or(0).checked_mul(sign)
}

/// Moves `year`/`month` by `months` and `years`, carrying month overflow into
/// the year. `None` when the year no longer fits in an `i64`.
fn carry_months(year: i64, month: i64, months: i64, years: i64) -> Option<(i64, i64)> {
    let shifted = (month - 1).checked_add(months)?;
    let carry = shifted.div_euclid(12);
    let year = year.checked_add(years)?.checked_add(carry)?;
    Some((year, shifted.rem_euclid(12) + 1))
}

/// Sums the fixed-length units of `duration` into a single delta.
fn fixed_delta(duration: &Duration, sign: i64) -> Option<TimeDelta> {
    let mut delta = TimeDelta::zero();
    for (unit, count) in duration.units() {
        let count = count.checked_mul(sign)?;
        let part = match unit {
            TimeUnit::Year | TimeUnit::Month => continue,
            TimeUnit::Day => TimeDelta::try_days(count)?,
            TimeUnit::Hour => TimeDelta::try_hours(count)?,
            TimeUnit::Minute => TimeDelta::try_minutes(count)?,
            TimeUnit::Second => TimeDelta::try_seconds(count)?,
            TimeUnit::Microsecond => TimeDelta::microseconds(count),
        };
        delta = delta.checked_add(&part)?;
    }
    Some(delta)
}

fn with_year_month(
    instant: NaiveDateTime,
    year: i64,
    month: i64,
) -> Result<NaiveDateTime, ExpressionError> {
    let date = i32::try_from(year)
        .ok()
        .zip(u32::try_from(month).ok())
        .and_then(|(year, month)| NaiveDate::from_ymd_opt(year, month, instant.day()))
        .ok_or_else(|| {
            ExpressionError::InvalidDate(format!(
                "{year:04}-{month:02}-{:02} does not exist",
                instant.day()
            ))
        })?;
    Ok(date.and_time(instant.time()))
}

/// Assigns every unit present in `duration` to the matching field of
/// `instant`, leaving the other fields untouched.
pub fn replace(
    instant: NaiveDateTime,
    duration: &Duration,
) -> Result<NaiveDateTime, ExpressionError> {
    let field = |unit: TimeUnit, current: i64| duration.get(unit).unwrap_or(current);

    let year = field(TimeUnit::Year, i64::from(instant.year()));
    let month = field(TimeUnit::Month, i64::from(instant.month()));
    let day = field(TimeUnit::Day, i64::from(instant.day()));
    let hour = field(TimeUnit::Hour, i64::from(instant.hour()));
    let minute = field(TimeUnit::Minute, i64::from(instant.minute()));
    let second = field(TimeUnit::Second, i64::from(instant.second()));
    let micro = field(
        TimeUnit::Microsecond,
        i64::from(instant.nanosecond() / 1_000),
    );

    let invalid = || {
        ExpressionError::InvalidDate(format!(
            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{micro:06} is not a valid datetime"
        ))
    };

    let date = i32::try_from(year)
        .ok()
        .zip(u32::try_from(month).ok())
        .zip(u32::try_from(day).ok())
        .and_then(|((year, month), day)| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or_else(invalid)?;

    let time = [hour, minute, second, micro]
        .into_iter()
        .map(u32::try_from)
        .collect::<Result<Vec<u32>, _>>()
        .ok()
        .and_then(|parts| match parts[..] {
            // from_hms_micro_opt accepts a leap second; a replaced field must not.
            [h, m, s, us] if us < 1_000_000 => NaiveTime::from_hms_micro_opt(h, m, s, us),
            _ => None,
        })
        .ok_or_else(invalid)?;

    Ok(date.and_time(time))
}

/// Truncates `instant` to the start of the calendar `unit` containing it.
pub fn truncate(instant: NaiveDateTime, unit: TimeUnit) -> Result<NaiveDateTime, ExpressionError> {
    use TimeUnit::*;

    const FIELDS: [(TimeUnit, i64); 6] = [
        (Month, 1),
        (Day, 1),
        (Hour, 0),
        (Minute, 0),
        (Second, 0),
        (Microsecond, 0),
    ];
    let reset = FIELDS
        .into_iter()
        .filter(|(field, _)| *field > unit)
        .fold(Duration::new(), |reset, (field, value)| reset.with(field, value));
    replace(instant, &reset)
}
