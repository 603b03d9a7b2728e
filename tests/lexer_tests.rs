// tests/lexer_tests.rs

use timex::ast::Token;
use timex::duration::TimeUnit;
use timex::lexer::{LexError, Lexer, Position, tokenize};

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("+", Token::Plus),
        ("-", Token::Minus),
        ("@", Token::Replace),
        ("$", Token::Var),
        ("(", Token::LParen),
        (")", Token::RParen),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

// ============================================================================
// Reserved Words
// ============================================================================

#[test]
fn test_unit_keywords() {
    let test_cases = vec![
        ("us", TimeUnit::Microsecond),
        ("s", TimeUnit::Second),
        ("sec", TimeUnit::Second),
        ("m", TimeUnit::Minute),
        ("min", TimeUnit::Minute),
        ("h", TimeUnit::Hour),
        ("hr", TimeUnit::Hour),
        ("d", TimeUnit::Day),
        ("mo", TimeUnit::Month),
        ("y", TimeUnit::Year),
        ("yr", TimeUnit::Year),
    ];

    for (input, unit) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token().unwrap(), Token::Unit(unit), "Failed for input: {}", input);
    }
}

#[test]
fn test_to_keyword() {
    let mut lexer = Lexer::new("to");
    assert_eq!(lexer.next_token().unwrap(), Token::To);
}

#[test]
fn test_near_keywords_are_identifiers() {
    for input in ["today", "hours", "days", "month", "year", "mon", "yrs", "_d"] {
        let mut lexer = Lexer::new(input);
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::Identifier(input.to_string()),
            "Failed for input: {}",
            input
        );
    }
}

// ============================================================================
// Numbers and Identifiers
// ============================================================================

#[test]
fn test_numbers() {
    let mut lexer = Lexer::new("0 42 2014");
    assert_eq!(lexer.next_token().unwrap(), Token::Number(0));
    assert_eq!(lexer.next_token().unwrap(), Token::Number(42));
    assert_eq!(lexer.next_token().unwrap(), Token::Number(2014));
}

#[test]
fn test_number_followed_by_unit() {
    let mut lexer = Lexer::new("1d 2h 30min");
    assert_eq!(lexer.next_token().unwrap(), Token::Number(1));
    assert_eq!(lexer.next_token().unwrap(), Token::Unit(TimeUnit::Day));
    assert_eq!(lexer.next_token().unwrap(), Token::Number(2));
    assert_eq!(lexer.next_token().unwrap(), Token::Unit(TimeUnit::Hour));
    assert_eq!(lexer.next_token().unwrap(), Token::Number(30));
    assert_eq!(lexer.next_token().unwrap(), Token::Unit(TimeUnit::Minute));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_identifiers() {
    let mut lexer = Lexer::new("$test_thingy $_private $event2");
    assert_eq!(lexer.next_token().unwrap(), Token::Var);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("test_thingy".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Var);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("_private".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Var);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("event2".to_string()));
}

#[test]
fn test_whitespace_is_optional() {
    let mut lexer = Lexer::new("($a)+1d@6h");
    let expected = vec![
        Token::LParen,
        Token::Var,
        Token::Identifier("a".to_string()),
        Token::RParen,
        Token::Plus,
        Token::Number(1),
        Token::Unit(TimeUnit::Day),
        Token::Replace,
        Token::Number(6),
        Token::Unit(TimeUnit::Hour),
        Token::Eof,
    ];
    for token in expected {
        assert_eq!(lexer.next_token().unwrap(), token);
    }
}

// ============================================================================
// Positions and Errors
// ============================================================================

#[test]
fn test_positions_track_lines() {
    let tokens = tokenize("day\n  + 6h").unwrap();
    let positions: Vec<Position> = tokens.iter().map(|t| t.position).collect();
    assert_eq!(positions[0], Position { line: 1, column: 1 });
    assert_eq!(positions[1], Position { line: 2, column: 3 });
    assert_eq!(positions[2], Position { line: 2, column: 5 });
    assert_eq!(positions[3], Position { line: 2, column: 6 });
}

#[test]
fn test_tokenize_ends_with_eof() {
    let tokens = tokenize("").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].token, Token::Eof);
}

#[test]
fn test_unexpected_character() {
    let mut lexer = Lexer::new("$a % 1d");
    assert_eq!(lexer.next_token().unwrap(), Token::Var);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("a".to_string()));
    let err = lexer.next_token().unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedCharacter {
            character: '%',
            position: Position { line: 1, column: 4 },
        }
    );
    assert_eq!(err.to_string(), "Error on line 1, col 4: Unexpected character: '%'");
}

#[test]
fn test_unexpected_character_on_later_line() {
    let err = tokenize("day\n+ 6h\n#").unwrap_err();
    assert_eq!(err.position(), Position { line: 3, column: 1 });
}

#[test]
fn test_number_too_large() {
    let err = tokenize("$a + 99999999999999999999d").unwrap_err();
    assert!(matches!(err, LexError::NumberTooLarge { .. }));
}

#[test]
fn test_largest_number() {
    let mut lexer = Lexer::new("9223372036854775807");
    assert_eq!(lexer.next_token().unwrap(), Token::Number(i64::MAX));
}

#[test]
fn test_one_past_largest_number() {
    let err = tokenize("$a + 9223372036854775808y").unwrap_err();
    assert_eq!(
        err,
        LexError::NumberTooLarge {
            literal: "9223372036854775808".to_string(),
            position: Position { line: 1, column: 6 },
        }
    );
}

// ============================================================================
// Whitespace
// ============================================================================

#[test]
fn test_carriage_return_is_whitespace() {
    let tokens = tokenize("day\r\n+\t6h\r").unwrap();
    let kinds: Vec<&str> = tokens.iter().map(|s| s.token.kind()).collect();
    assert_eq!(kinds, vec!["IDENTIFIER", "PLUS", "NUMBER", "HOUR", "EOF"]);
    assert_eq!(tokens[1].position, Position { line: 2, column: 1 });
}
