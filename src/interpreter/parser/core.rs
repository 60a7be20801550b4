use std::collections::HashMap;

use log::trace;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        memory::{FunctionId, Memory, SlotId},
        parser::utils::{check_balance, render},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// One step of the precedence cascade.
///
/// Returns `Ok(None)` when its form is absent from the window, so the next
/// level is tried.
type Attempt<'m> = fn(&mut Parser<'m>, &[Token]) -> ParseResult<Option<Expr>>;

/// A scope the parser is currently inside of.
#[derive(Debug)]
pub enum Scope {
    /// The parameters of the function being declared.
    Function(FunctionId),
    /// The bindings of a `let` block, filled as declarations are parsed.
    Let(HashMap<String, SlotId>),
}

/// Parses the instructions of one session.
///
/// The parser borrows the session memory mutably: pending functions and `let`
/// slots are allocated while parsing, and identifiers resolve to their
/// handles.
pub struct Parser<'m> {
    pub(crate) memory: &'m mut Memory,
    pub(crate) scopes: Vec<Scope>,
}

impl<'m> Parser<'m> {
    /// Creates a parser over a session.
    pub fn new(memory: &'m mut Memory) -> Self {
        Self { memory,
               scopes: Vec::new() }
    }

    /// Parses one instruction.
    ///
    /// A leading `function` keyword makes the instruction a function
    /// declaration; anything else is an expression.
    ///
    /// # Errors
    /// Unbalanced parentheses are reported before anything else is parsed.
    ///
    /// # Example
    /// ```
    /// use hulk::interpreter::{lexer::tokenize, memory::Memory, parser::core::Parser};
    ///
    /// let mut memory = Memory::new();
    /// let mut parser = Parser::new(&mut memory);
    ///
    /// assert!(parser.parse(&tokenize("2 + 3 * 4").unwrap()).is_ok());
    /// assert!(parser.parse(&tokenize("(2 + 3").unwrap()).is_err());
    /// assert!(parser.parse(&tokenize("2 +").unwrap()).is_err());
    /// ```
    pub fn parse(&mut self, tokens: &[Token]) -> ParseResult<Expr> {
        check_balance(tokens)?;
        self.scopes.clear();

        match tokens {
            [Token::Function, rest @ ..] => self.parse_function_declaration(rest),
            _ => self.parse_expression(tokens),
        }
    }

    /// Parses a full expression.
    ///
    /// Tries each precedence level in turn, from statement forms down to
    /// primaries. The first level whose form is present in the window
    /// decides the node.
    ///
    /// # Errors
    /// A window no level recognizes is an invalid expression.
    pub(crate) fn parse_expression(&mut self, tokens: &[Token]) -> ParseResult<Expr> {
        let attempts: [Attempt<'m>; 6] = [Self::try_statement,
                                          Self::try_assignment,
                                          Self::try_binary,
                                          Self::try_power,
                                          Self::try_unary,
                                          Self::try_primary];

        for attempt in attempts {
            if let Some(expr) = attempt(self, tokens)? {
                return Ok(expr);
            }
        }

        Err(ParseError::InvalidExpression { text: render(tokens) })
    }

    /// Runs `parse` inside `scope`, popping the scope whether or not parsing
    /// succeeds.
    pub(crate) fn parse_in_scope<T>(&mut self,
                                    scope: Scope,
                                    parse: impl FnOnce(&mut Self) -> ParseResult<T>)
                                    -> ParseResult<T> {
        trace!("push {scope:?}");
        self.scopes.push(scope);
        let result = parse(self);
        self.scopes.pop();
        trace!("pop scope at depth {}", self.scopes.len());
        result
    }
}
