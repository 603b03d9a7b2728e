use std::fmt;

use thiserror::Error;
use tracing::trace;

use crate::ast::Token;
use crate::duration::TimeUnit;

/// Location of a token in the source, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, col {}", self.line, self.column)
    }
}

/// A token together with where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Error on {position}: Unexpected character: '{character}'")]
    UnexpectedCharacter { character: char, position: Position },

    #[error("Error on {position}: Number too large: {literal}")]
    NumberTooLarge { literal: String, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::NumberTooLarge { position, .. } => *position,
        }
    }
}

/// Single-character tokens.
const PUNCTUATION: [(char, Token); 6] = [
    ('+', Token::Plus),
    ('-', Token::Minus),
    ('@', Token::Replace),
    ('$', Token::Var),
    ('(', Token::LParen),
    (')', Token::RParen),
];

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    line_start: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            line_start: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn location(&self) -> Position {
        Position {
            line: self.line,
            column: self.position - self.line_start + 1,
        }
    }

    /// Skips blanks; newlines only move the line counter.
    ///
    /// Besides space and tab, a carriage return counts as a blank so that
    /// CRLF input lexes like LF input.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            match ch {
                '\n' => {
                    self.advance();
                    self.line += 1;
                    self.line_start = self.position;
                }
                ' ' | '\t' | '\r' => self.advance(),
                _ => break,
            }
        }
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if accept(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_number(&mut self, position: Position) -> Result<Token, LexError> {
        let literal = self.read_while(|c| c.is_ascii_digit());
        literal
            .parse::<i64>()
            .map(Token::Number)
            .map_err(|_| LexError::NumberTooLarge { literal, position })
    }

    fn read_word(&mut self) -> Token {
        let word = self.read_while(|c| c.is_ascii_alphanumeric() || c == '_');
        if word == "to" {
            return Token::To;
        }
        match TimeUnit::from_keyword(&word) {
            Some(unit) => Token::Unit(unit),
            None => Token::Identifier(word),
        }
    }

    /// Reads the next token and the position it starts at.
    pub fn next_spanned(&mut self) -> Result<Spanned, LexError> {
        self.skip_whitespace();
        let position = self.location();

        let token = match self.current_char() {
            None => Token::Eof,
            Some(ch) if ch.is_ascii_digit() => self.read_number(position)?,
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.read_word(),
            Some(ch) => {
                let token = PUNCTUATION
                    .iter()
                    .find(|(c, _)| *c == ch)
                    .map(|(_, token)| token.clone())
                    .ok_or(LexError::UnexpectedCharacter {
                        character: ch,
                        position,
                    })?;
                self.advance();
                token
            }
        };

        trace!(token = %token, kind = token.kind(), %position, "lexed token");
        Ok(Spanned { token, position })
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.next_spanned().map(|spanned| spanned.token)
    }
}

/// Lexes all of `input`, including the trailing [`Token::Eof`].
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let spanned = lexer.next_spanned()?;
        let done = spanned.token == Token::Eof;
        tokens.push(spanned);
        if done {
            return Ok(tokens);
        }
    }
}

#[test]
fn test_reserved_words() {
    let mut lexer = Lexer::new("to us sec min hr mo yr");
    assert_eq!(lexer.next_token().unwrap(), Token::To);
    assert_eq!(lexer.next_token().unwrap(), Token::Unit(TimeUnit::Microsecond));
    assert_eq!(lexer.next_token().unwrap(), Token::Unit(TimeUnit::Second));
    assert_eq!(lexer.next_token().unwrap(), Token::Unit(TimeUnit::Minute));
    assert_eq!(lexer.next_token().unwrap(), Token::Unit(TimeUnit::Hour));
    assert_eq!(lexer.next_token().unwrap(), Token::Unit(TimeUnit::Month));
    assert_eq!(lexer.next_token().unwrap(), Token::Unit(TimeUnit::Year));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_expression() {
    let mut lexer = Lexer::new("day($a) + 6h");
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("day".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::LParen);
    assert_eq!(lexer.next_token().unwrap(), Token::Var);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("a".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::RParen);
    assert_eq!(lexer.next_token().unwrap(), Token::Plus);
    assert_eq!(lexer.next_token().unwrap(), Token::Number(6));
    assert_eq!(lexer.next_token().unwrap(), Token::Unit(TimeUnit::Hour));
}
