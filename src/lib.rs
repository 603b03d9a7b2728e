//! # timex
//!
//! A mini-language for deriving timestamps and date ranges from named
//! datetimes. Much like regular expressions do for strings, time expressions
//! are short strings that can be safely read from configuration or user
//! input:
//!
//! ```
//! use chrono::NaiveDate;
//! use timex::TimeOps;
//!
//! let event = NaiveDate::from_ymd_opt(2014, 8, 1).unwrap().and_hms_opt(2, 10, 23).unwrap();
//!
//! let window = timex::parse("day($event) + 6h").unwrap();
//! let range = window.evaluate([("event", event)]).unwrap();
//!
//! // 6am to 6am, still containing the event
//! assert_eq!(range.begin(), NaiveDate::from_ymd_opt(2014, 7, 31).unwrap().and_hms_opt(6, 0, 0).unwrap());
//! assert!(range.matches(event));
//! ```
//!
//! See [`ast`] for the syntax.

pub mod ast;
pub mod calendar;
pub mod cli;
pub mod duration;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod expression;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{DurationOp, Expr, Token};
pub use duration::{Duration, TimeUnit};
pub use environment::Environment;
pub use error::{Result, TimexError};
pub use evaluator::{Evaluator, ExpressionError};
pub use expression::Expression;
pub use lexer::{LexError, Lexer, Position, tokenize};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser};
pub use value::{PinnedTimeRange, TimeMatcher, TimeOps, TimeRange, Timestamp};

/// Parses `text` into a reusable [`Expression`].
pub fn parse(text: &str) -> std::result::Result<Expression, ParseError> {
    Expression::parse(text)
}

/// Parses and evaluates `text` in one step.
pub fn eval<I, K>(text: &str, variables: I) -> Result<TimeMatcher>
where
    I: IntoIterator<Item = (K, chrono::NaiveDateTime)>,
    K: Into<String>,
{
    Ok(parse(text)?.evaluate(variables)?)
}
