use crate::error::{Category, RuntimeError};

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during lexing, splitting or parsing.
pub enum ParseError {
    /// A fragment of source text starts no token.
    UnrecognizedToken {
        /// The unrecognized text.
        fragment: String,
    },
    /// A word is used as a name but is not a valid identifier.
    InvalidIdentifier {
        /// The offending word.
        name: String,
    },
    /// A word starting with a digit is not a valid number.
    InvalidNumber {
        /// The offending literal.
        literal: String,
    },
    /// A keyword, constant or built-in name was used as a declared name.
    IdentifierReserved {
        /// The reserved name.
        name: String,
    },
    /// A required token or sub-expression is missing.
    Missing {
        /// What is missing, e.g. `right operand`.
        what:     String,
        /// Where it was expected, e.g. `'+' expression`.
        location: String,
    },
    /// A comma separated list has a leading, trailing or doubled comma.
    MalformedList {
        /// The list being parsed.
        location: String,
    },
    /// A parenthesis has no partner.
    UnmatchedParenthesis {
        /// The missing character, `(` or `)`.
        missing: char,
    },
    /// No expression form matches the tokens.
    InvalidExpression {
        /// The tokens, joined by spaces.
        text: String,
    },
    /// A typed variable declaration appeared outside a `let` block.
    FreeVariableDeclaration,
    /// A function declaration appeared inside another expression.
    NestedFunctionDeclaration,
    /// A function declares the same parameter twice.
    DuplicateParameter {
        /// The function name.
        function: String,
        /// The repeated parameter.
        name:     String,
    },
    /// A name does not resolve to any variable in scope.
    UnknownVariable {
        /// The name.
        name: String,
    },
    /// A name does not resolve to a registered or enclosing function.
    UnknownFunction {
        /// The name.
        name: String,
    },
    /// The left side of `:=` is not a variable.
    NotAssignable {
        /// The offending target.
        name: String,
    },
    /// Computing the return type of a function exceeded the call-depth limit.
    MayExceedCallStack {
        /// The function name.
        function: String,
        /// The call-depth limit.
        limit:    usize,
    },
    /// A type or value error found while checking a declaration.
    Static(RuntimeError),
}

impl ParseError {
    /// Returns the category of the diagnostic.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::UnrecognizedToken { .. }
            | Self::InvalidIdentifier { .. }
            | Self::InvalidNumber { .. }
            | Self::IdentifierReserved { .. } => Category::Lexical,
            Self::Missing { .. }
            | Self::MalformedList { .. }
            | Self::UnmatchedParenthesis { .. }
            | Self::InvalidExpression { .. }
            | Self::FreeVariableDeclaration
            | Self::NestedFunctionDeclaration => Category::Syntax,
            Self::DuplicateParameter { .. }
            | Self::UnknownVariable { .. }
            | Self::UnknownFunction { .. } => Category::Reference,
            Self::NotAssignable { .. } => Category::Semantic,
            Self::MayExceedCallStack { .. } => Category::Overflow,
            Self::Static(e) => e.category(),
        }
    }
}

impl From<RuntimeError> for ParseError {
    fn from(error: RuntimeError) -> Self {
        Self::Static(error)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedToken { fragment } => write!(f, "unrecognized token '{fragment}'."),
            Self::InvalidIdentifier { name } => write!(f, "'{name}' is not a valid identifier."),
            Self::InvalidNumber { literal } => write!(f, "'{literal}' is not a valid number."),
            Self::IdentifierReserved { name } => write!(f, "identifier '{name}' is reserved."),
            Self::Missing { what, location } => write!(f, "missing {what} in {location}."),
            Self::MalformedList { location } => {
                write!(f, "misplaced ',' in {location}.")
            },
            Self::UnmatchedParenthesis { missing } => write!(f, "missing '{missing}'."),
            Self::InvalidExpression { text } => write!(f, "'{text}' is not a valid expression."),
            Self::FreeVariableDeclaration => {
                write!(f, "variables can only be declared inside a 'let' expression.")
            },
            Self::NestedFunctionDeclaration => {
                write!(f, "functions can only be declared as a whole instruction.")
            },
            Self::DuplicateParameter { function, name } => write!(f,
                                                                  "function '{function}' declares parameter '{name}' more than once."),
            Self::UnknownVariable { name } => write!(f, "variable '{name}' is not defined."),
            Self::UnknownFunction { name } => write!(f, "function '{name}' is not defined."),
            Self::NotAssignable { name } => write!(f, "cannot assign to '{name}'."),
            Self::MayExceedCallStack { function, limit } => write!(f,
                                                                   "function '{function}' may exceed the call-stack limit of {limit}."),
            Self::Static(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {}
