use std::f64::consts::{E, PI};

use crate::{
    ast::{Expr, SlotRef},
    error::ParseError,
    interpreter::{
        memory::FunctionId,
        parser::core::{ParseResult, Parser, Scope},
        value::core::Value,
    },
};

/// Named constants of the language, resolved before any scope.
pub const CONSTANTS: &[(&str, f64)] = &[("PI", PI),
                                        ("π", PI),
                                        ("E", E),
                                        ("e", E),
                                        ("Infinity", f64::INFINITY),
                                        ("∞", f64::INFINITY)];

/// How a call resolved.
pub(crate) struct ResolvedFunction {
    pub id:      FunctionId,
    /// The function is the one being declared, and has no body yet.
    pub pending: bool,
}

impl Parser<'_> {
    /// Resolves a name used as a value.
    ///
    /// Constants come first; then the scope stack is walked innermost first,
    /// so the nearest `let` binding or parameter shadows outer ones.
    ///
    /// # Errors
    /// [`ParseError::UnknownVariable`] if no scope binds the name.
    pub(crate) fn resolve(&self, name: &str) -> ParseResult<Expr> {
        if let Some((_, value)) = CONSTANTS.iter().find(|(constant, _)| *constant == name) {
            return Ok(Expr::Literal { value: Value::Number(*value) });
        }

        for scope in self.scopes.iter().rev() {
            let slot = match scope {
                Scope::Function(id) => self.memory.function(*id).slots.get(name).copied(),
                Scope::Let(bindings) => bindings.get(name).copied(),
            };
            if let Some(slot) = slot {
                return Ok(Expr::Variable(SlotRef { name: name.to_string(),
                                                   slot,
                                                   dependent: self.memory.is_dependent(slot) }));
            }
        }

        Err(ParseError::UnknownVariable { name: name.to_string() })
    }

    /// Resolves a name used as a function.
    ///
    /// Registered functions come first. Otherwise the name may refer to the
    /// function currently being declared, which allows self-recursion before
    /// the function is registered.
    ///
    /// # Errors
    /// [`ParseError::UnknownFunction`] if neither matches.
    pub(crate) fn resolve_function(&self, name: &str) -> ParseResult<ResolvedFunction> {
        if let Some(id) = self.memory.lookup(name) {
            return Ok(ResolvedFunction { id,
                                         pending: false });
        }

        let declaring = self.scopes.iter().rev().find_map(|scope| match scope {
                                                     Scope::Function(id) => Some(*id),
                                                     Scope::Let(_) => None,
                                                 });
        match declaring {
            Some(id) if self.memory.function(id).name == name => {
                Ok(ResolvedFunction { id,
                                      pending: true })
            },
            _ => Err(ParseError::UnknownFunction { name: name.to_string() }),
        }
    }
}
