use crate::{ast::BinaryOperator, error::Category, interpreter::value::core::Kind};

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while computing the type or the value
/// of an expression.
pub enum RuntimeError {
    /// An expression received a value of the wrong kind.
    TypeMismatch {
        /// Description of the expression, e.g. `operator '+'`.
        expression: String,
        /// The kind the expression accepts.
        expected:   Kind,
        /// The kind it received.
        received:   Kind,
    },
    /// A function was called with the wrong number of arguments.
    ArgumentCountMismatch {
        /// The function name.
        function: String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
    },
    /// Division or modulo by zero.
    DivisionByZero {
        /// The operator that divided.
        operator: BinaryOperator,
    },
    /// A function exceeded the call-depth limit.
    StackOverflow {
        /// The function name.
        function: String,
        /// The call-depth limit.
        limit:    usize,
    },
    /// A slot was read before anything was written into it.
    UninitializedVariable {
        /// The variable name.
        name: String,
    },
    /// A function was called before its body was attached.
    IncompleteFunction {
        /// The function name.
        function: String,
    },
    /// A second function with an already registered name was declared.
    FunctionAlreadyDefined {
        /// The function name.
        name: String,
    },
}

impl RuntimeError {
    /// Returns the category of the diagnostic.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::TypeMismatch { .. } | Self::ArgumentCountMismatch { .. } => Category::Semantic,
            Self::DivisionByZero { .. } => Category::Arithmetic,
            Self::StackOverflow { .. } => Category::Overflow,
            Self::UninitializedVariable { .. }
            | Self::IncompleteFunction { .. }
            | Self::FunctionAlreadyDefined { .. } => Category::Reference,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch { expression,
                                 expected,
                                 received, } => {
                write!(f, "{expression} expected {expected} but received {received}.")
            },
            Self::ArgumentCountMismatch { function,
                                          expected,
                                          found, } => write!(f,
                                                             "function '{function}' takes {expected} argument(s) but {found} were given."),
            Self::DivisionByZero { operator } => {
                write!(f, "division by zero in operator '{operator}'.")
            },
            Self::StackOverflow { function, limit } => write!(f,
                                                              "function '{function}' exceeded the call-stack limit of {limit}."),
            Self::UninitializedVariable { name } => {
                write!(f, "variable '{name}' is used before it is initialized.")
            },
            Self::IncompleteFunction { function } => {
                write!(f, "function '{function}' is called before its body is defined.")
            },
            Self::FunctionAlreadyDefined { name } => {
                write!(f, "function '{name}' is already defined.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
