use std::fmt;

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// The static kind of an expression, a slot or a runtime value.
///
/// `Dynamic` is the kind of anything whose type cannot be known before
/// evaluation, such as a function parameter. It is compatible with every
/// other kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The kind of declarations, which produce no value.
    Void,
    /// A double precision number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// A string of text.
    Text,
    /// Undetermined until evaluation.
    Dynamic,
}

impl Kind {
    /// Returns `true` if a value of kind `other` may be used where `self` is
    /// expected.
    ///
    /// # Example
    /// ```
    /// use hulk::interpreter::value::core::Kind;
    ///
    /// assert!(Kind::Number.accepts(Kind::Number));
    /// assert!(Kind::Number.accepts(Kind::Dynamic));
    /// assert!(Kind::Dynamic.accepts(Kind::Text));
    /// assert!(!Kind::Boolean.accepts(Kind::Number));
    /// ```
    #[must_use]
    pub fn accepts(self, other: Self) -> bool {
        self == Self::Dynamic || other == Self::Dynamic || self == other
    }

    /// Combines the kinds of two alternatives, such as the branches of a
    /// conditional. Differing kinds yield `Dynamic`.
    #[must_use]
    pub fn unify(self, other: Self) -> Self {
        if self == other { self } else { Self::Dynamic }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Void => "void",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Text => "string",
            Self::Dynamic => "dynamic",
        };
        write!(f, "{name}")
    }
}

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The result of a declaration.
    Void,
    /// A double precision number.
    Number(f64),
    /// A boolean.
    Boolean(bool),
    /// A string of text.
    Text(String),
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl Value {
    /// Returns the kind of this value.
    ///
    /// # Example
    /// ```
    /// use hulk::interpreter::value::core::{Kind, Value};
    ///
    /// assert_eq!(Value::from(2.0).kind(), Kind::Number);
    /// assert_eq!(Value::from("two").kind(), Kind::Text);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Void => Kind::Void,
            Self::Number(_) => Kind::Number,
            Self::Boolean(_) => Kind::Boolean,
            Self::Text(_) => Kind::Text,
        }
    }

    /// Extracts a number, or reports that `expression` received another kind.
    pub fn as_number(&self, expression: &str) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(self.mismatch(expression, Kind::Number)),
        }
    }

    /// Extracts a boolean, or reports that `expression` received another
    /// kind.
    pub fn as_boolean(&self, expression: &str) -> EvalResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            _ => Err(self.mismatch(expression, Kind::Boolean)),
        }
    }

    /// Checks that this value may be stored where `expected` is declared.
    pub fn expect_kind(&self, expression: &str, expected: Kind) -> EvalResult<()> {
        if expected.accepts(self.kind()) {
            Ok(())
        } else {
            Err(self.mismatch(expression, expected))
        }
    }

    fn mismatch(&self, expression: &str, expected: Kind) -> RuntimeError {
        RuntimeError::TypeMismatch { expression: expression.to_string(),
                                     expected,
                                     received: self.kind() }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}
