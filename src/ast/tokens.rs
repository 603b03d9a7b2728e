use std::fmt;

use crate::duration::TimeUnit;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Non-negative integer count
    ///
    /// # Examples
    /// ```text
    /// 6
    /// 2014
    /// ```
    Number(i64),

    /// Unit keyword following a number
    ///
    /// # Examples
    /// ```text
    /// us  s  sec  m  min  h  hr  d  mo  y  yr
    /// ```
    Unit(TimeUnit),

    /// Variable or range function name
    ///
    /// Must start with letter or underscore, followed by letters, digits, or
    /// underscores. Reserved words (`to` and the unit keywords) never lex as
    /// identifiers.
    ///
    /// # Examples
    /// ```text
    /// day
    /// event_start
    /// ```
    Identifier(String),

    /// Variable prefix
    ///
    /// # Examples
    /// ```text
    /// $timestamp
    /// $event
    /// ```
    Var,

    /// Range construction keyword
    ///
    /// # Examples
    /// ```text
    /// $start to $end
    /// ```
    To,

    // Operators
    /// Shift forward
    Plus,

    /// Shift backward
    Minus,

    /// Assign calendar fields
    ///
    /// # Examples
    /// ```text
    /// day @ 6h
    /// $a @ 2015y
    /// ```
    Replace,

    // Delimiters
    /// Left parenthesis for grouping or function arguments
    LParen,

    /// Right parenthesis
    RParen,

    /// End of input
    Eof,
}

impl Token {
    /// Upper-case kind name, as shown in token listings and parse errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Number(_) => "NUMBER",
            Token::Unit(TimeUnit::Year) => "YEAR",
            Token::Unit(TimeUnit::Month) => "MONTH",
            Token::Unit(TimeUnit::Day) => "DAY",
            Token::Unit(TimeUnit::Hour) => "HOUR",
            Token::Unit(TimeUnit::Minute) => "MINUTE",
            Token::Unit(TimeUnit::Second) => "SECOND",
            Token::Unit(TimeUnit::Microsecond) => "MICROSECOND",
            Token::Identifier(_) => "IDENTIFIER",
            Token::Var => "VAR",
            Token::To => "TO",
            Token::Plus => "PLUS",
            Token::Minus => "MINUS",
            Token::Replace => "REPLACE",
            Token::LParen => "LPAREN",
            Token::RParen => "RPAREN",
            Token::Eof => "EOF",
        }
    }
}

impl fmt::Display for Token {
    /// Writes the token the way it appears in source text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Unit(unit) => write!(f, "{unit}"),
            Token::Identifier(name) => f.write_str(name),
            Token::Var => f.write_str("$"),
            Token::To => f.write_str("to"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Replace => f.write_str("@"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}
