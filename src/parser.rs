//! Recursive-descent parser for time expressions.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expression := operations [ TO operations ]
//! operations := primary { ( '+' | '-' | '@' ) duration }
//! primary    := '$' IDENTIFIER
//!             | IDENTIFIER [ '(' operations ')' ]
//!             | '(' expression ')'
//! duration   := { NUMBER [ unit ] }+
//! ```
//!
//! `to` binds loosest, so `$a to $b + 1d` ends one day after `$b`. Both sides
//! of `to` and the argument of a range function must be points.

use std::mem;

use thiserror::Error;

use crate::{
    ast::{DurationOp, Expr, Token},
    duration::Duration,
    lexer::{LexError, Lexer, Position, Spanned},
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("Parse error at {position} near token {found} ({}): expected {expected}", .found.kind())]
    UnexpectedToken {
        found: Token,
        expected: String,
        position: Position,
    },

    #[error("Parse error at {position}: expected a point in time, found a range")]
    ExpectedPoint { position: Position },

    #[error("Parse error at {position}: durations add up to more than {}", i64::MAX)]
    DurationOverflow { position: Position },

    #[error(
        "Parse error at {position}: duration '{duration}' has no unit; only ranges and range functions accept unit-less durations"
    )]
    AmbiguousDuration {
        duration: Duration,
        position: Position,
    },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::UnexpectedToken { position, .. }
            | ParseError::ExpectedPoint { position }
            | ParseError::DurationOverflow { position }
            | ParseError::AmbiguousDuration { position, .. } => *position,
        }
    }
}

pub struct Parser {
    lexer: Lexer,
    current: Spanned,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current = lexer.next_spanned()?;
        Ok(Parser { lexer, current })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.lexer.next_spanned()?;
        Ok(())
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            found: self.current.token.clone(),
            expected: expected.to_string(),
            position: self.current.position,
        }
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current.token) == mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(&format!("'{expected}'")));
        }
        self.advance()
    }

    fn require_point(expr: &Expr, position: Position) -> Result<(), ParseError> {
        if expr.is_range() {
            return Err(ParseError::ExpectedPoint { position });
        }
        Ok(())
    }

    /// Parses the whole input as one expression.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        self.expect(Token::Eof)?;
        Ok(expr)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let begin_position = self.current.position;
        let begin = self.parse_operations()?;

        if !self.check(&Token::To) {
            return Ok(begin);
        }
        Self::require_point(&begin, begin_position)?;
        self.advance()?; // consume 'to'

        let end_position = self.current.position;
        let end = self.parse_operations()?;
        Self::require_point(&end, end_position)?;

        Ok(Expr::range(begin, end))
    }

    fn parse_operations(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            let op = match &self.current.token {
                Token::Plus => DurationOp::Plus,
                Token::Minus => DurationOp::Minus,
                Token::Replace => DurationOp::Replace,
                _ => break,
            };
            let position = self.current.position;
            self.advance()?;

            let duration = self.parse_duration()?;
            expr = Expr::operation(op, expr, duration, position)?;
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match mem::replace(&mut self.current.token, Token::Eof) {
            Token::Var => {
                self.advance()?;
                match mem::replace(&mut self.current.token, Token::Eof) {
                    Token::Identifier(name) => {
                        self.advance()?;
                        Ok(Expr::Variable(name))
                    }
                    token => {
                        self.current.token = token;
                        Err(self.unexpected("a variable name after '$'"))
                    }
                }
            }
            Token::Identifier(name) => {
                self.advance()?;
                if !self.check(&Token::LParen) {
                    return Ok(Expr::range_function(name, None));
                }
                self.advance()?; // consume '('

                let arg_position = self.current.position;
                let arg = self.parse_operations()?;
                Self::require_point(&arg, arg_position)?;
                self.expect(Token::RParen)?;

                Ok(Expr::range_function(name, Some(arg)))
            }
            Token::LParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            token => {
                self.current.token = token;
                Err(self.unexpected("'$', '(' or a range function"))
            }
        }
    }

    /// Adjacent durations (`1d 2h`) are summed into one.
    fn parse_duration(&mut self) -> Result<Duration, ParseError> {
        let mut duration: Option<Duration> = None;

        while let Token::Number(count) = self.current.token {
            let position = self.current.position;
            self.advance()?;
            let part = if let Token::Unit(unit) = self.current.token {
                self.advance()?;
                Duration::of(unit, count)
            } else {
                Duration::ambiguous(count)
            };
            duration = Some(match duration {
                None => part,
                Some(sum) => sum
                    .checked_add(part)
                    .ok_or(ParseError::DurationOverflow { position })?,
            });
        }

        duration.ok_or_else(|| self.unexpected("a duration"))
    }
}

#[test]
fn test_to_binds_loosest() {
    let expr = Parser::new(Lexer::new("$a to $b + 1d"))
        .and_then(|mut p| p.parse())
        .unwrap();
    match expr {
        Expr::Range { begin, end } => {
            assert_eq!(*begin, Expr::variable("a"));
            assert!(matches!(*end, Expr::Operation { op: DurationOp::Plus, .. }));
        }
        other => panic!("Expected range, got {other:?}"),
    }
}
