//! Token listing for `timex tokens`

use crate::lexer::tokenize;

use super::CliError;

/// Lexes `expression` and renders one `value  KIND` line per token,
/// excluding the end-of-input marker.
pub fn format_tokens(expression: &str) -> Result<String, CliError> {
    let tokens = tokenize(expression).map_err(crate::ParseError::from)?;
    let mut output = String::new();
    for spanned in tokens.iter().filter(|s| s.token != crate::Token::Eof) {
        output.push_str(&format!(
            "{:<20}{:<12}{}\n",
            spanned.token.to_string(),
            spanned.token.kind(),
            spanned.position
        ));
    }
    Ok(output)
}
