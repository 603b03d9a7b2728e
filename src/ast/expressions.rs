use std::fmt;

use crate::ast::DurationOp;
use crate::duration::Duration;
use crate::lexer::Position;
use crate::parser::ParseError;

/// Name of the variable a bare range function is applied to.
pub const DEFAULT_VARIABLE: &str = "timestamp";

/// Abstract Syntax Tree node representing a parsed time expression.
///
/// Nodes own their children exclusively and are never modified after
/// parsing, so one tree can be evaluated any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Named instant from the environment
    ///
    /// # Example
    /// ```text
    /// $event
    /// ```
    Variable(String),

    /// Bucket function applied to a point
    ///
    /// Without parentheses the argument is `$timestamp`.
    ///
    /// # Examples
    /// ```text
    /// day($event)
    /// month
    /// ```
    RangeFunction { name: String, arg: Box<Expr> },

    /// Range between two points
    ///
    /// # Example
    /// ```text
    /// $start to $end
    /// ```
    Range { begin: Box<Expr>, end: Box<Expr> },

    /// Duration applied to a point or range
    ///
    /// # Examples
    /// ```text
    /// $a + 1d 2h
    /// day - 6h
    /// day @ 2
    /// ```
    Operation {
        op: DurationOp,
        expr: Box<Expr>,
        duration: Duration,
    },
}

impl Expr {
    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    /// A range function over `arg`, or over `$timestamp` when `arg` is `None`.
    pub fn range_function(name: impl Into<String>, arg: Option<Expr>) -> Self {
        Expr::RangeFunction {
            name: name.into(),
            arg: Box::new(arg.unwrap_or_else(|| Expr::variable(DEFAULT_VARIABLE))),
        }
    }

    pub fn range(begin: Expr, end: Expr) -> Self {
        Expr::Range {
            begin: Box::new(begin),
            end: Box::new(end),
        }
    }

    /// Builds an operation node.
    ///
    /// A unit-less duration is only accepted directly on a range construction
    /// or a range function: `day @ 2` and `($a to $b) + 3` parse, while
    /// `$a + 2` and `day + 6h @ 2` do not.
    pub fn operation(
        op: DurationOp,
        expr: Expr,
        duration: Duration,
        position: Position,
    ) -> Result<Self, ParseError> {
        let resolvable = matches!(expr, Expr::Range { .. } | Expr::RangeFunction { .. });
        if duration.is_ambiguous() && !resolvable {
            return Err(ParseError::AmbiguousDuration { duration, position });
        }
        Ok(Expr::Operation {
            op,
            expr: Box::new(expr),
            duration,
        })
    }

    /// Whether this expression evaluates to a range rather than a point.
    pub fn is_range(&self) -> bool {
        match self {
            Expr::Variable(_) => false,
            Expr::RangeFunction { .. } | Expr::Range { .. } => true,
            Expr::Operation { expr, .. } => expr.is_range(),
        }
    }
}

impl fmt::Display for Expr {
    /// Writes the expression back as source text, fully parenthesized.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Variable(name) => write!(f, "${name}"),
            Expr::RangeFunction { name, arg } => write!(f, "{name}({arg})"),
            Expr::Range { begin, end } => write!(f, "({begin} to {end})"),
            Expr::Operation { op, expr, duration } => {
                write!(f, "({expr} {op}")?;
                for (unit, count) in duration.units() {
                    write!(f, " {count}{}", unit_keyword(unit))?;
                }
                if let Some(unknown) = duration.unknown() {
                    write!(f, " {unknown}")?;
                }
                write!(f, ")")
            }
        }
    }
}

fn unit_keyword(unit: crate::duration::TimeUnit) -> &'static str {
    use crate::duration::TimeUnit::*;
    match unit {
        Year => "y",
        Month => "mo",
        Day => "d",
        Hour => "h",
        Minute => "m",
        Second => "s",
        Microsecond => "us",
    }
}
