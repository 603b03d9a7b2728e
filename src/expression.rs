use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Utc};
use tracing::debug;

use crate::{
    ast::Expr,
    environment::Environment,
    evaluator::{Evaluator, ExpressionError},
    lexer::Lexer,
    parser::{ParseError, Parser},
    value::TimeMatcher,
};

/// A parsed time expression, ready to be evaluated any number of times.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2014, 8, 1).unwrap().and_hms_micro_opt(2, 10, 23, 550).unwrap();
/// let expr = timex::parse("$a + 1d 2h").unwrap();
/// let result = expr.evaluate([("a", at)]).unwrap();
///
/// assert!(!result.is_range());
/// assert_eq!(
///     result.timestamp(),
///     NaiveDate::from_ymd_opt(2014, 8, 2).unwrap().and_hms_micro_opt(4, 10, 23, 550).unwrap(),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    source: String,
    root: Expr,
}

impl Expression {
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let mut parser = Parser::new(Lexer::new(source))?;
        let root = parser.parse()?;
        debug!(source, ast = %root, "parsed time expression");
        Ok(Expression {
            source: source.to_string(),
            root,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> &Expr {
        &self.root
    }

    /// Whether evaluation yields a range (as opposed to a single timestamp).
    pub fn is_range(&self) -> bool {
        self.root.is_range()
    }

    /// Evaluates against `env` exactly as given.
    pub fn apply(&self, env: &Environment) -> Result<TimeMatcher, ExpressionError> {
        let result = Evaluator::new(env).eval(&self.root);
        debug!(source = %self.source, ?result, "evaluated time expression");
        result
    }

    /// Evaluates with the given named instants. `$timestamp` defaults to the
    /// current UTC time when not supplied.
    pub fn evaluate<I, K>(&self, variables: I) -> Result<TimeMatcher, ExpressionError>
    where
        I: IntoIterator<Item = (K, NaiveDateTime)>,
        K: Into<String>,
    {
        self.evaluate_in(variables.into_iter().collect())
    }

    /// Like [`Expression::evaluate`], for a prepared environment (for example
    /// one with extra range functions registered).
    pub fn evaluate_in(&self, mut env: Environment) -> Result<TimeMatcher, ExpressionError> {
        env.seed_timestamp(Utc::now().naive_utc());
        self.apply(&env)
    }
}

impl FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
