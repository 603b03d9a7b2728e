use thiserror::Error;

use crate::{
    ast::{DurationOp, Expr},
    environment::Environment,
    value::{TimeMatcher, TimeOps, TimeRange, Timestamp},
};

/// Errors that can occur while evaluating a parsed expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// `$name` has no binding in the environment
    #[error("Variable {0} not defined")]
    UndefinedVariable(String),

    /// No range function registered under this name
    #[error("Unknown function {0}")]
    UnknownFunction(String),

    /// The duration cannot be applied to this kind of value
    #[error("Invalid duration for time operation: {0}")]
    InvalidDuration(String),

    /// The arithmetic produced a date or time that does not exist
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A pinned range could not be moved back over its pinned instant
    #[error("Cannot pin range: {0}")]
    UnpinnableRange(String),
}

/// Walks an [`Expr`] tree against an [`Environment`].
pub struct Evaluator<'env> {
    env: &'env Environment,
}

impl<'env> Evaluator<'env> {
    pub fn new(env: &'env Environment) -> Self {
        Evaluator { env }
    }

    /// Evaluates `expr` to a timestamp or range.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use timex::{Environment, Evaluator, Lexer, Parser, TimeOps};
    ///
    /// let at = NaiveDate::from_ymd_opt(2014, 8, 1).unwrap().and_hms_opt(2, 10, 23).unwrap();
    /// let env = Environment::new().with("a", at);
    ///
    /// let mut parser = Parser::new(Lexer::new("day($a)")).unwrap();
    /// let expr = parser.parse().unwrap();
    ///
    /// let result = Evaluator::new(&env).eval(&expr).unwrap();
    /// assert!(result.is_range());
    /// assert!(result.matches(at));
    /// ```
    pub fn eval(&self, expr: &Expr) -> Result<TimeMatcher, ExpressionError> {
        match expr {
            Expr::Variable(name) => self
                .env
                .get(name)
                .map(|instant| Timestamp::new(instant).into())
                .ok_or_else(|| ExpressionError::UndefinedVariable(name.clone())),

            Expr::RangeFunction { name, arg } => {
                let arg = self.eval(arg)?;
                self.env.call_function(name, arg.timestamp())
            }

            Expr::Range { begin, end } => {
                let begin = self.eval(begin)?;
                let end = self.eval(end)?;
                Ok(TimeRange::new(begin.timestamp(), end.timestamp()).into())
            }

            Expr::Operation { op, expr, duration } => {
                let value = self.eval(expr)?;
                match op {
                    DurationOp::Plus => value.add(duration),
                    DurationOp::Minus => value.sub(duration),
                    DurationOp::Replace => value.replace(duration),
                }
            }
        }
    }
}
