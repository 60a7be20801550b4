use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Groups a token list into semicolon-delimited instructions.
///
/// A final group without its `;` still counts when it is not empty; the empty
/// remainder after a final `;` does not. Empty groups between two `;` are
/// kept so instruction positions match the source, and the compiler skips
/// them.
///
/// # Errors
/// A `;` reached while a `(` is still open is a malformed split, reported as
/// the missing `)`.
///
/// # Example
/// ```
/// use hulk::interpreter::{lexer::tokenize, splitter::split_instructions};
///
/// let groups = split_instructions(tokenize("1/0; 2+2;").unwrap()).unwrap();
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[1].len(), 3);
///
/// assert!(split_instructions(tokenize("print(1; 2)").unwrap()).is_err());
/// ```
pub fn split_instructions(tokens: Vec<Token>) -> ParseResult<Vec<Vec<Token>>> {
    let mut instructions = Vec::new();
    let mut current = Vec::new();
    let mut depth = 0usize;

    for token in tokens {
        match token {
            Token::Semicolon if depth > 0 => {
                return Err(ParseError::UnmatchedParenthesis { missing: ')' });
            },
            Token::Semicolon => {
                instructions.push(std::mem::take(&mut current));
                continue;
            },
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            _ => {},
        }
        current.push(token);
    }

    if !current.is_empty() {
        instructions.push(current);
    }

    Ok(instructions)
}
