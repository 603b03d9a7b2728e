//! Evaluate time expressions from the command line

use chrono::NaiveDateTime;
use tracing::debug;

use crate::{Environment, Expression, TimeMatcher, TimeOps};
use super::{CliError, parse_binding, parse_instant};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The time expression to evaluate
    pub expression: String,
    /// `name=INSTANT` variable bindings
    pub bindings: Vec<String>,
    /// Value for `$timestamp` (defaults to now)
    pub at: Option<String>,
    /// Instant to test against the result
    pub matches: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed; `is_range` tells what the expression yields
    SyntaxValid { is_range: bool },
    /// Expression evaluated successfully
    Success {
        value: TimeMatcher,
        /// Whether `--matches` fell inside the result, when given
        matched: Option<bool>,
    },
}

/// Execute a timex check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expression = Expression::parse(&options.expression)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid {
            is_range: expression.is_range(),
        });
    }

    let mut env = options
        .bindings
        .iter()
        .map(|binding| parse_binding(binding))
        .collect::<Result<Environment, CliError>>()?;
    if let Some(at) = &options.at {
        env.set("timestamp", parse_instant(at)?);
    }
    debug!(?env, "evaluating with environment");

    let value = expression.evaluate_in(env)?;
    let matched = options
        .matches
        .as_deref()
        .map(parse_instant)
        .transpose()?
        .map(|instant: NaiveDateTime| value.matches(instant));

    Ok(CheckResult::Success { value, matched })
}
