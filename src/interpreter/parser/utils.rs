use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, scope::CONSTANTS, unary::BUILTIN_FUNCTIONS},
    },
};

/// Checks that every parenthesis of an instruction has a partner.
///
/// Once an instruction is balanced, every window the parser splits off at
/// the top level is balanced too, so the scanning helpers below never fail.
///
/// # Errors
/// [`ParseError::UnmatchedParenthesis`] naming the missing character.
pub(crate) fn check_balance(tokens: &[Token]) -> ParseResult<()> {
    let mut depth = 0usize;
    for token in tokens {
        match token {
            Token::LParen => depth += 1,
            Token::RParen if depth == 0 => {
                return Err(ParseError::UnmatchedParenthesis { missing: '(' });
            },
            Token::RParen => depth -= 1,
            _ => {},
        }
    }

    if depth == 0 {
        Ok(())
    } else {
        Err(ParseError::UnmatchedParenthesis { missing: ')' })
    }
}

/// Returns the index of the `)` closing the `(` at `open`.
pub(crate) fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            },
            _ => {},
        }
    }
    None
}

/// Returns the index of the `(` opening the `)` at `close`.
fn matching_open(tokens: &[Token], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for i in (0..=close).rev() {
        match tokens[i] {
            Token::RParen => depth += 1,
            Token::LParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            },
            _ => {},
        }
    }
    None
}

/// Scans right to left for the last top-level token satisfying `matches`,
/// jumping over parenthesized spans.
///
/// `matches` receives the index of the candidate, so callers can inspect its
/// neighbours.
pub(crate) fn find_last_top_level(tokens: &[Token],
                                  matches: impl Fn(usize, &Token) -> bool)
                                  -> Option<usize> {
    let mut i = tokens.len();
    while i > 0 {
        i -= 1;
        if tokens[i] == Token::RParen {
            i = matching_open(tokens, i)?;
            continue;
        }
        if matches(i, &tokens[i]) {
            return Some(i);
        }
    }
    None
}

/// Scans left to right for the first top-level token satisfying `matches`,
/// jumping over parenthesized spans.
pub(crate) fn find_first_top_level(tokens: &[Token],
                                   matches: impl Fn(&Token) -> bool)
                                   -> Option<usize> {
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i] == Token::LParen {
            i = matching_close(tokens, i)? + 1;
            continue;
        }
        if matches(&tokens[i]) {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Returns the index of the first top-level statement keyword, or the length
/// of the window.
///
/// A `let`, `if` or `function` extends to the end of its window, so operators
/// after it belong to its body and are not split points.
pub(crate) fn statement_boundary(tokens: &[Token]) -> usize {
    find_first_top_level(tokens, |t| matches!(t, Token::Let | Token::If | Token::Function))
        .unwrap_or(tokens.len())
}

/// Finds the top-level `closer` matching a construct already opened before
/// the window, honouring nested `opener`/`closer` pairs.
///
/// # Example
/// For `if (b) 1 else 2 else 3` after the outer `if (a)`, the first `else`
/// belongs to the nested `if`, so the second one is returned.
pub(crate) fn find_matching_keyword(tokens: &[Token],
                                    opener: &Token,
                                    closer: &Token)
                                    -> Option<usize> {
    let mut depth = 0usize;
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if *token == Token::LParen {
            i = matching_close(tokens, i)? + 1;
            continue;
        }
        if token == opener {
            depth += 1;
        } else if token == closer {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
        i += 1;
    }
    None
}

/// Splits a comma separated list at its top-level commas.
///
/// Commas inside parentheses and inside nested `let ... in` declarations do
/// not split. An empty window is an empty list.
///
/// # Errors
/// [`ParseError::MalformedList`] for a leading, trailing or doubled comma.
pub(crate) fn split_top_level<'t>(tokens: &'t [Token],
                                  location: &str)
                                  -> ParseResult<Vec<&'t [Token]>> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let mut items = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut lets = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            Token::Let if depth == 0 => lets += 1,
            Token::In if depth == 0 => lets = lets.saturating_sub(1),
            Token::Comma if depth == 0 && lets == 0 => {
                items.push(&tokens[start..i]);
                start = i + 1;
            },
            _ => {},
        }
    }
    items.push(&tokens[start..]);

    if items.iter().any(|item| item.is_empty()) {
        return Err(ParseError::MalformedList { location: location.to_string() });
    }
    Ok(items)
}

/// Checks that `name` may be declared: a valid identifier that is neither a
/// constant nor a built-in.
///
/// # Errors
/// - [`ParseError::InvalidIdentifier`] for a malformed name.
/// - [`ParseError::IdentifierReserved`] for a constant or built-in name.
pub(crate) fn validate_declared_name(name: &str) -> ParseResult<()> {
    validate_identifier(name)?;
    if is_reserved(name) {
        return Err(ParseError::IdentifierReserved { name: name.to_string() });
    }
    Ok(())
}

/// Checks that `name` starts with a letter or `_` and continues with letters,
/// digits or `_`.
pub(crate) fn validate_identifier(name: &str) -> ParseResult<()> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ParseError::InvalidIdentifier { name: name.to_string() })
    }
}

/// Returns `true` if `name` is a constant or a built-in function.
///
/// Keywords never reach this check, since the lexer never produces them as
/// words.
pub(crate) fn is_reserved(name: &str) -> bool {
    CONSTANTS.iter().any(|(constant, _)| *constant == name) || BUILTIN_FUNCTIONS.contains(&name)
}

/// Renders a token window back to text, for diagnostics.
pub(crate) fn render(tokens: &[Token]) -> String {
    tokens.iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    #[test]
    fn last_top_level_skips_parentheses() {
        let tokens = tokenize("a - (b - c)").unwrap();
        let found = find_last_top_level(&tokens, |_, t| *t == Token::Minus);
        assert_eq!(found, Some(1));
    }

    #[test]
    fn nested_else_is_skipped() {
        let tokens = tokenize("if (b) 1 else 2 else 3").unwrap();
        assert_eq!(find_matching_keyword(&tokens, &Token::If, &Token::Else), Some(7));
    }

    #[test]
    fn malformed_lists_are_rejected() {
        for source in [", a", "a,", "a,,b"] {
            let tokens = tokenize(source).unwrap();
            assert!(matches!(split_top_level(&tokens, "call"),
                             Err(ParseError::MalformedList { .. })));
        }

        let tokens = tokenize("f(a, b), c").unwrap();
        assert_eq!(split_top_level(&tokens, "call").unwrap().len(), 2);
    }

    #[test]
    fn unbalanced_parentheses_name_the_missing_side() {
        let open = tokenize("(1 + 2").unwrap();
        let close = tokenize("1 + 2)").unwrap();
        assert_eq!(check_balance(&open), Err(ParseError::UnmatchedParenthesis { missing: ')' }));
        assert_eq!(check_balance(&close), Err(ParseError::UnmatchedParenthesis { missing: '(' }));
    }

    #[test]
    fn identifiers() {
        assert!(validate_identifier("fact_2").is_ok());
        assert!(validate_identifier("2fact").is_err());
        assert!(validate_declared_name("sqrt").is_err());
        assert!(validate_declared_name("π").is_err());
    }
}
