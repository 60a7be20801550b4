use std::{collections::HashMap, rc::Rc};

use log::debug;

use crate::{
    ast::{Expr, VariableDeclaration},
    error::{ParseError, RuntimeError},
    interpreter::{
        evaluator::core::{Context, MAX_CALL_DEPTH, Mode},
        lexer::Token,
        memory::Slot,
        parser::{
            binary::missing,
            core::{ParseResult, Parser, Scope},
            utils::{find_matching_keyword, matching_close, split_top_level, validate_declared_name},
        },
    },
};

impl Parser<'_> {
    /// Dispatches on a leading statement keyword.
    ///
    /// `let` and `if` start expressions. A function declaration or a typed
    /// variable declaration reached here is misplaced: functions are whole
    /// instructions, and typed variables only appear inside `let`.
    pub(crate) fn try_statement(&mut self, tokens: &[Token]) -> ParseResult<Option<Expr>> {
        match tokens.first() {
            Some(Token::Let) => self.parse_let(&tokens[1..]).map(Some),
            Some(Token::If) => self.parse_if(&tokens[1..]).map(Some),
            Some(Token::Function) => Err(ParseError::NestedFunctionDeclaration),
            Some(Token::TypeName(_)) => Err(ParseError::FreeVariableDeclaration),
            _ => Ok(None),
        }
    }

    /// Parses a function declaration after the `function` keyword.
    ///
    /// Syntax:
    /// ```text
    ///     function name(a, b) => body
    /// ```
    /// The function is pushed as a scope while its body is parsed, so the
    /// body can refer to its parameters and call itself. Once the body is
    /// attached, the return kind is computed; a body that cannot be typed
    /// within the call-depth limit is rejected.
    ///
    /// # Errors
    /// - `Missing` for an absent name, parameter list, `=>` or body.
    /// - `DuplicateParameter` if a parameter is named twice.
    /// - `MayExceedCallStack` if typing the body overflows the call stack.
    pub(crate) fn parse_function_declaration(&mut self, tokens: &[Token]) -> ParseResult<Expr> {
        const LOCATION: &str = "function declaration";

        let Some(Token::Word(name)) = tokens.first() else {
            return Err(missing("function name", LOCATION));
        };
        validate_declared_name(name)?;
        if self.memory.lookup(name).is_some() {
            return Err(RuntimeError::FunctionAlreadyDefined { name: name.clone() }.into());
        }

        if tokens.get(1) != Some(&Token::LParen) {
            return Err(missing("parameter list", LOCATION));
        }
        let close = matching_close(tokens, 1).ok_or(ParseError::UnmatchedParenthesis { missing: ')' })?;

        let mut parameters = Vec::new();
        for parameter in split_top_level(&tokens[2..close], LOCATION)? {
            let [Token::Word(parameter)] = parameter else {
                return Err(missing("parameter name", LOCATION));
            };
            validate_declared_name(parameter)?;
            parameters.push(parameter.clone());
        }

        if tokens.get(close + 1) != Some(&Token::Arrow) {
            return Err(missing("'=>'", LOCATION));
        }
        let body = &tokens[close + 2..];
        if body.is_empty() {
            return Err(missing("body", LOCATION));
        }

        let id = self.memory.declare_function(name, parameters)?;
        let body = self.parse_in_scope(Scope::Function(id), |parser| parser.parse_expression(body))?;
        self.memory.attach_body(id, body);

        let kind = Context::probe(self.memory).declaration_kind(id)
                                              .map_err(|e| match e {
                                                  RuntimeError::StackOverflow { .. } => {
                                                      ParseError::MayExceedCallStack { function: name.clone(),
                                                                                       limit:    MAX_CALL_DEPTH, }
                                                  },
                                                  e => ParseError::Static(e),
                                              })?;
        debug!("function '{name}' returns {kind}");

        Ok(Expr::FunctionDeclaration { name:     name.clone(),
                                       function: id, })
    }

    /// Parses a `let` expression after the `let` keyword.
    ///
    /// Syntax:
    /// ```text
    ///     let [type] name = value, ... in body
    /// ```
    /// Each binding is visible to the declarations after it and to the body,
    /// but not to its own initializer. Independent initializers are computed
    /// once, without side effects, as soon as they are parsed.
    pub(crate) fn parse_let(&mut self, tokens: &[Token]) -> ParseResult<Expr> {
        const LOCATION: &str = "'let' expression";

        let Some(index) = find_matching_keyword(tokens, &Token::Let, &Token::In) else {
            return Err(missing("'in'", LOCATION));
        };
        let (declarations, body) = (&tokens[..index], &tokens[index + 1..]);
        if declarations.is_empty() {
            return Err(missing("declarations", LOCATION));
        }
        if body.is_empty() {
            return Err(missing("body", LOCATION));
        }

        self.parse_in_scope(Scope::Let(HashMap::new()), |parser| {
                let mut parsed = Vec::new();
                for declaration in split_top_level(declarations, LOCATION)? {
                    parsed.push(parser.parse_variable_declaration(declaration)?);
                }
                let body = parser.parse_expression(body)?;
                Ok(Expr::LetIn { declarations: parsed,
                                 body:         Box::new(body), })
            })
    }

    fn parse_variable_declaration(&mut self, tokens: &[Token]) -> ParseResult<VariableDeclaration> {
        const LOCATION: &str = "'let' declaration";

        let (declared, rest) = match tokens {
            [Token::TypeName(kind), rest @ ..] => (Some(*kind), rest),
            _ => (None, tokens),
        };
        let Some(Token::Word(name)) = rest.first() else {
            return Err(missing("variable name", LOCATION));
        };
        validate_declared_name(name)?;
        if rest.get(1) != Some(&Token::Equals) {
            return Err(missing("'='", LOCATION));
        }
        let initializer = &rest[2..];
        if initializer.is_empty() {
            return Err(missing("initializer", LOCATION));
        }

        let initializer = self.parse_expression(initializer)?;
        let inferred = Context::probe(self.memory).compute_type(&initializer)?;
        let kind = match declared {
            Some(kind) if !kind.accepts(inferred) => {
                return Err(RuntimeError::TypeMismatch { expression: format!("variable '{name}'"),
                                                        expected:   kind,
                                                        received:   inferred, }.into());
            },
            Some(kind) => kind,
            None => inferred,
        };

        let dependent = initializer.is_dependent();
        let initializer = Rc::new(initializer);
        let slot = self.memory.allocate(Slot { dependent,
                                               ..Slot::local(name, kind) });
        if dependent {
            self.memory.bind(slot, Rc::clone(&initializer));
        } else {
            let value = Context::probe(self.memory).evaluate(&initializer, Mode::Probe)?;
            self.memory.write(slot, value)?;
        }

        if let Some(Scope::Let(bindings)) = self.scopes.last_mut() {
            bindings.insert(name.clone(), slot);
        }

        Ok(VariableDeclaration { name: name.clone(),
                                 slot,
                                 kind,
                                 initializer,
                                 dependent })
    }

    /// Parses an `if` expression after the `if` keyword.
    ///
    /// Syntax:
    /// ```text
    ///     if (condition) then_branch else else_branch
    /// ```
    /// The `else` is found by pairing nested `if`/`else` keywords, so
    /// conditionals nest without parentheses.
    pub(crate) fn parse_if(&mut self, tokens: &[Token]) -> ParseResult<Expr> {
        const LOCATION: &str = "'if' expression";

        if tokens.first() != Some(&Token::LParen) {
            return Err(missing("'('", LOCATION));
        }
        let close = matching_close(tokens, 0).ok_or(ParseError::UnmatchedParenthesis { missing: ')' })?;
        let condition = &tokens[1..close];
        if condition.is_empty() {
            return Err(missing("condition", LOCATION));
        }

        let rest = &tokens[close + 1..];
        let Some(index) = find_matching_keyword(rest, &Token::If, &Token::Else) else {
            return Err(missing("'else'", LOCATION));
        };
        let (then_branch, else_branch) = (&rest[..index], &rest[index + 1..]);
        if then_branch.is_empty() {
            return Err(missing("then branch", LOCATION));
        }
        if else_branch.is_empty() {
            return Err(missing("else branch", LOCATION));
        }

        let condition = self.parse_expression(condition)?;
        let then_branch = self.parse_expression(then_branch)?;
        let else_branch = self.parse_expression(else_branch)?;

        Ok(Expr::IfElse { condition:   Box::new(condition),
                          then_branch: Box::new(then_branch),
                          else_branch: Box::new(else_branch), })
    }
}
