//! Crate-level error type covering every stage of the pipeline.

use thiserror::Error;

use crate::evaluator::ExpressionError;
use crate::lexer::LexError;
use crate::parser::ParseError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimexError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Expression(#[from] ExpressionError),
}

impl From<LexError> for TimexError {
    fn from(e: LexError) -> Self {
        TimexError::Parse(ParseError::Lex(e))
    }
}

pub type Result<T> = std::result::Result<T, TimexError>;
