//! Variables and range functions an expression is evaluated against.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::ast::expressions::DEFAULT_VARIABLE;
use crate::calendar;
use crate::duration::{Duration, TimeUnit};
use crate::evaluator::ExpressionError;
use crate::value::{PinnedTimeRange, TimeMatcher};

/// A named range function: takes the instant it is applied to and returns
/// the range for it.
pub type RangeFn =
    Arc<dyn Fn(NaiveDateTime) -> Result<TimeMatcher, ExpressionError> + Send + Sync>;

/// The calendar bucket of `unit` containing `instant`, pinned to `instant`.
///
/// ```
/// use chrono::NaiveDate;
/// use timex::{environment::bucket, TimeUnit};
///
/// let at = NaiveDate::from_ymd_opt(2014, 8, 1).unwrap().and_hms_opt(2, 10, 23).unwrap();
/// let day = bucket(at, TimeUnit::Day).unwrap();
/// assert_eq!(day.range.begin, at.date().and_hms_opt(0, 0, 0).unwrap());
/// assert_eq!(day.pinned_to, at);
/// ```
pub fn bucket(instant: NaiveDateTime, unit: TimeUnit) -> Result<PinnedTimeRange, ExpressionError> {
    let begin = calendar::truncate(instant, unit)?;
    let end = calendar::add(begin, &Duration::of(unit, 1))?;
    Ok(PinnedTimeRange::new(begin, end, instant, unit))
}

fn bucket_fn(unit: TimeUnit) -> RangeFn {
    Arc::new(move |instant| bucket(instant, unit).map(TimeMatcher::from))
}

/// Named instants plus the range functions callable by name.
///
/// A fresh environment knows the `hour`, `day`, `month` and `year`
/// functions and no variables.
#[derive(Clone)]
pub struct Environment {
    variables: HashMap<String, NaiveDateTime>,
    functions: HashMap<String, RangeFn>,
}

impl Default for Environment {
    fn default() -> Self {
        let mut env = Environment {
            variables: HashMap::new(),
            functions: HashMap::new(),
        };
        for unit in [TimeUnit::Hour, TimeUnit::Day, TimeUnit::Month, TimeUnit::Year] {
            env.functions.insert(unit.name().to_string(), bucket_fn(unit));
        }
        env
    }
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `instant`, returning the previous binding.
    pub fn set(&mut self, name: impl Into<String>, instant: NaiveDateTime) -> Option<NaiveDateTime> {
        self.variables.insert(name.into(), instant)
    }

    /// Builder form of [`Environment::set`].
    pub fn with(mut self, name: impl Into<String>, instant: NaiveDateTime) -> Self {
        self.set(name, instant);
        self
    }

    pub fn get(&self, name: &str) -> Option<NaiveDateTime> {
        self.variables.get(name).copied()
    }

    /// Binds `$timestamp` to `now` unless the caller already bound it.
    pub fn seed_timestamp(&mut self, now: NaiveDateTime) {
        self.variables
            .entry(DEFAULT_VARIABLE.to_string())
            .or_insert(now);
    }

    /// Makes `name` callable as a range function, replacing any function of
    /// the same name.
    pub fn register_function<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(NaiveDateTime) -> Result<TimeMatcher, ExpressionError> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(function));
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn call_function(&self, name: &str, instant: NaiveDateTime) -> Result<TimeMatcher, ExpressionError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| ExpressionError::UnknownFunction(name.to_string()))?;
        function(instant)
    }
}

impl<K: Into<String>> FromIterator<(K, NaiveDateTime)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, NaiveDateTime)>>(iter: I) -> Self {
        let mut env = Environment::new();
        for (name, instant) in iter {
            env.set(name, instant);
        }
        env
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut functions: Vec<&String> = self.functions.keys().collect();
        functions.sort();
        f.debug_struct("Environment")
            .field("variables", &self.variables)
            .field("functions", &functions)
            .finish()
    }
}
