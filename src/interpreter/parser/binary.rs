use crate::{
    ast::{BinaryOperator, Expr, SlotRef},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, Parser},
            utils::{
                find_first_top_level, find_last_top_level, render, split_top_level,
                statement_boundary,
            },
        },
    },
};

/// Binary precedence levels, loosest first.
///
/// Each level is split at its right-most top-level operator, which makes
/// every level left-associative.
const BINARY_LEVELS: [&[BinaryOperator]; 7] = {
    use BinaryOperator::{
        Add, And, Concat, Div, EagerAnd, EagerOr, Equal, Greater, GreaterEqual, Less, LessEqual,
        Mod, Mul, NotEqual, Or, SpacedConcat, Sub,
    };
    [&[Or, EagerOr],
     &[And, EagerAnd],
     &[Equal, NotEqual],
     &[Less, Greater, LessEqual, GreaterEqual],
     &[Concat, SpacedConcat],
     &[Add, Sub],
     &[Mul, Div, Mod]]
};

/// Maps a token to the binary operator it spells, if any.
///
/// # Example
/// ```
/// use hulk::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::DoubleAt), Some(BinaryOperator::SpacedConcat));
/// assert_eq!(token_to_binary_operator(&Token::Bang), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    use BinaryOperator::{
        Add, And, Concat, Div, EagerAnd, EagerOr, Equal, Greater, GreaterEqual, Less, LessEqual,
        Mod, Mul, NotEqual, Or, Pow, SpacedConcat, Sub,
    };
    let op = match token {
        Token::DoublePipe => Or,
        Token::Pipe => EagerOr,
        Token::DoubleAmpersand => And,
        Token::Ampersand => EagerAnd,
        Token::EqualEqual => Equal,
        Token::BangEqual => NotEqual,
        Token::Less => Less,
        Token::Greater => Greater,
        Token::LessEqual => LessEqual,
        Token::GreaterEqual => GreaterEqual,
        Token::At => Concat,
        Token::DoubleAt => SpacedConcat,
        Token::Plus => Add,
        Token::Minus => Sub,
        Token::Star => Mul,
        Token::Slash => Div,
        Token::Percent => Mod,
        Token::Caret => Pow,
        _ => return None,
    };
    Some(op)
}

impl Parser<'_> {
    /// Parses destructive assignment, `a, b := value`.
    ///
    /// The first top-level `:=` splits the window, so assignment is
    /// right-associative: `a := b := 1` assigns `1` to both.
    pub(crate) fn try_assignment(&mut self, tokens: &[Token]) -> ParseResult<Option<Expr>> {
        let window = &tokens[..statement_boundary(tokens)];
        let Some(index) = find_first_top_level(window, |t| *t == Token::ColonEquals) else {
            return Ok(None);
        };

        let (left, right) = (&tokens[..index], &tokens[index + 1..]);
        if left.is_empty() {
            return Err(missing("assignment target", "':=' expression"));
        }
        if right.is_empty() {
            return Err(missing("value", "':=' expression"));
        }

        let mut targets = Vec::new();
        for target in split_top_level(left, "assignment targets")? {
            targets.push(self.assignment_target(target)?);
        }
        let value = self.parse_expression(right)?;

        Ok(Some(Expr::Assignment { targets,
                                   value: Box::new(value) }))
    }

    fn assignment_target(&self, tokens: &[Token]) -> ParseResult<SlotRef> {
        if let [Token::Word(name)] = tokens
           && let Expr::Variable(reference) = self.resolve(name)?
        {
            return Ok(reference);
        }
        Err(ParseError::NotAssignable { name: render(tokens) })
    }

    /// Parses the binary precedence levels from `||` down to `*`, `/`, `%`.
    ///
    /// `+` and `-` split the window only where they follow the end of an
    /// operand; elsewhere they are unary and are left to
    /// [`try_unary`](Self::try_unary).
    pub(crate) fn try_binary(&mut self, tokens: &[Token]) -> ParseResult<Option<Expr>> {
        let window = &tokens[..statement_boundary(tokens)];

        for level in BINARY_LEVELS {
            let found = find_last_top_level(window, |i, token| {
                            let Some(op) = token_to_binary_operator(token) else {
                                return false;
                            };
                            if !level.contains(&op) {
                                return false;
                            }
                            match op {
                                BinaryOperator::Add | BinaryOperator::Sub => {
                                    i > 0 && window[i - 1].ends_operand()
                                },
                                _ => true,
                            }
                        });

            if let Some(index) = found
               && let Some(op) = token_to_binary_operator(&tokens[index])
            {
                return self.binary_node(tokens, index, op).map(Some);
            }
        }

        Ok(None)
    }

    /// Parses the power operator. The first top-level `^` splits the window,
    /// so `2 ^ 3 ^ 2` is `2 ^ 9`.
    pub(crate) fn try_power(&mut self, tokens: &[Token]) -> ParseResult<Option<Expr>> {
        let window = &tokens[..statement_boundary(tokens)];
        match find_first_top_level(window, |t| *t == Token::Caret) {
            Some(index) => self.binary_node(tokens, index, BinaryOperator::Pow).map(Some),
            None => Ok(None),
        }
    }

    fn binary_node(&mut self,
                   tokens: &[Token],
                   index: usize,
                   op: BinaryOperator)
                   -> ParseResult<Expr> {
        let location = format!("'{op}' expression");
        let (left, right) = (&tokens[..index], &tokens[index + 1..]);
        if left.is_empty() {
            return Err(missing("left operand", &location));
        }
        if right.is_empty() {
            return Err(missing("right operand", &location));
        }

        let left = self.parse_expression(left)?;
        let right = self.parse_expression(right)?;
        Ok(Expr::BinaryOp { left: Box::new(left),
                            op,
                            right: Box::new(right) })
    }
}

/// Builds a "missing X in Y" diagnostic.
pub(crate) fn missing(what: &str, location: &str) -> ParseError {
    ParseError::Missing { what:     what.to_string(),
                          location: location.to_string(), }
}
