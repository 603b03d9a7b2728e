//! CLI support for timex
//!
//! Provides programmatic access to the `timex` command's functionality for
//! embedding in other tools.

mod check;
mod convert;
mod docs;
mod tokens;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use convert::{parse_binding, parse_instant};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use tokens::format_tokens;

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Lexer or parser error
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    /// Evaluation error
    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::ExpressionError),

    /// Malformed `--var` argument
    #[error("Invalid binding '{0}': expected name=INSTANT")]
    InvalidBinding(String),

    /// Unparseable instant
    #[error("Invalid instant '{0}': expected YYYY-MM-DD[THH:MM:SS[.ffffff]]")]
    InvalidInstant(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No expression provided
    #[error("No expression provided. Pass one as an argument or pipe it to stdin.")]
    NoInput,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'timex docs' to see available categories.")]
    UnknownCategory(String),
}

impl From<crate::TimexError> for CliError {
    fn from(e: crate::TimexError) -> Self {
        match e {
            crate::TimexError::Parse(e) => CliError::Parse(e),
            crate::TimexError::Expression(e) => CliError::Eval(e),
        }
    }
}
