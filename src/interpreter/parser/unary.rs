use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::{ParseError, RuntimeError},
    interpreter::{
        lexer::Token,
        parser::{
            binary::missing,
            core::{ParseResult, Parser},
            scope::CONSTANTS,
            utils::{matching_close, split_top_level, validate_identifier},
        },
        value::core::Value,
    },
};

/// Builds the node of a built-in call from its parsed arguments, or `None`
/// if the argument count is wrong.
type BuiltinConstructor = fn(Vec<Expr>) -> Option<Expr>;

macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                build: $build:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: usize,
            build: BuiltinConstructor,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, build: $build },
            )*
        ];
        /// Names of the built-in functions. They cannot be redeclared.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sqrt"  => { arity: 1, build: |args| unary(UnaryOperator::Sqrt, args) },
    "sin"   => { arity: 1, build: |args| unary(UnaryOperator::Sin, args) },
    "cos"   => { arity: 1, build: |args| unary(UnaryOperator::Cos, args) },
    "exp"   => { arity: 1, build: |args| unary(UnaryOperator::Exp, args) },
    "log"   => { arity: 2, build: logarithm },
    "print" => { arity: 1, build: print },
}

fn unary(op: UnaryOperator, args: Vec<Expr>) -> Option<Expr> {
    let [expr] = <[Expr; 1]>::try_from(args).ok()?;
    Some(Expr::UnaryOp { op,
                         expr: Box::new(expr) })
}

fn logarithm(args: Vec<Expr>) -> Option<Expr> {
    let [base, value] = <[Expr; 2]>::try_from(args).ok()?;
    Some(Expr::BinaryOp { left:  Box::new(base),
                          op:    BinaryOperator::Log,
                          right: Box::new(value), })
}

fn print(args: Vec<Expr>) -> Option<Expr> {
    let [argument] = <[Expr; 1]>::try_from(args).ok()?;
    Some(Expr::PrintCall { argument: Box::new(argument) })
}

impl Parser<'_> {
    /// Parses a prefix operator or a fully parenthesized window.
    ///
    /// Grammar: `unary := ("!" | "+" | "-") expression | "(" expression ")"`
    pub(crate) fn try_unary(&mut self, tokens: &[Token]) -> ParseResult<Option<Expr>> {
        let op = match tokens.first() {
            Some(Token::Bang) => UnaryOperator::Not,
            Some(Token::Plus) => UnaryOperator::Plus,
            Some(Token::Minus) => UnaryOperator::Negate,
            Some(Token::LParen) => {
                if matching_close(tokens, 0) != Some(tokens.len() - 1) {
                    return Ok(None);
                }
                let inner = &tokens[1..tokens.len() - 1];
                if inner.is_empty() {
                    return Err(missing("expression", "parentheses"));
                }
                return self.parse_expression(inner).map(Some);
            },
            _ => return Ok(None),
        };

        let operand = &tokens[1..];
        if operand.is_empty() {
            return Err(missing("operand", &format!("'{op}' expression")));
        }

        let expr = self.parse_expression(operand)?;
        Ok(Some(Expr::UnaryOp { op,
                                expr: Box::new(expr) }))
    }

    /// Parses literals, names and calls.
    ///
    /// A word starting with a digit or `.` must be a number. Any other word
    /// is a constant or a variable; a word followed by a parenthesized
    /// argument list is a call of a built-in or a user function.
    pub(crate) fn try_primary(&mut self, tokens: &[Token]) -> ParseResult<Option<Expr>> {
        match tokens {
            [Token::Bool(b)] => Ok(Some(Expr::Literal { value: Value::Boolean(*b) })),
            [Token::Text(text)] => Ok(Some(Expr::Literal { value: Value::Text(text.clone()) })),
            [Token::Word(word)] => self.parse_word(word).map(Some),
            [Token::Word(name), Token::LParen, ..]
                if matching_close(tokens, 1) == Some(tokens.len() - 1) =>
            {
                self.parse_call(name, &tokens[2..tokens.len() - 1]).map(Some)
            },
            _ => Ok(None),
        }
    }

    fn parse_word(&self, word: &str) -> ParseResult<Expr> {
        if word.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            return word.parse::<f64>()
                       .map(|n| Expr::Literal { value: Value::Number(n) })
                       .map_err(|_| ParseError::InvalidNumber { literal: word.to_string() });
        }
        if !CONSTANTS.iter().any(|(constant, _)| *constant == word) {
            validate_identifier(word)?;
        }
        self.resolve(word)
    }

    fn parse_call(&mut self, name: &str, arguments: &[Token]) -> ParseResult<Expr> {
        let location = format!("arguments of '{name}'");
        let mut parsed = Vec::new();
        for argument in split_top_level(arguments, &location)? {
            parsed.push(self.parse_expression(argument)?);
        }

        if let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name) {
            let mismatch = RuntimeError::ArgumentCountMismatch { function: name.to_string(),
                                                                 expected: builtin.arity,
                                                                 found:    parsed.len(), };
            return (builtin.build)(parsed).ok_or(ParseError::from(mismatch));
        }

        validate_identifier(name)?;
        let resolved = self.resolve_function(name)?;
        let dependent = resolved.pending || parsed.iter().any(Expr::is_dependent);
        Ok(Expr::FunctionCall { name: name.to_string(),
                                function: resolved.id,
                                arguments: parsed,
                                dependent })
    }
}
