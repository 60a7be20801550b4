use std::fmt;

/// Parsing errors.
///
/// Defines the diagnostics raised before an instruction is evaluated:
/// invalid tokens, missing operands or delimiters, unresolved names and
/// declarations that may exceed the call-stack limit.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the diagnostics raised by expression nodes while computing their
/// type or value, such as kind mismatches, division by zero and call-stack
/// overflow.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// The closed taxonomy every diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A token is not a valid instance of the expected category.
    Lexical,
    /// A required token or sub-expression is missing.
    Syntax,
    /// An expression received a value of the wrong kind.
    Semantic,
    /// Division or modulo by zero.
    Arithmetic,
    /// A function exceeded the call-depth limit.
    Overflow,
    /// A name could not be resolved, or was declared twice.
    Reference,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lexical => "Lexical",
            Self::Syntax => "Syntax",
            Self::Semantic => "Semantic",
            Self::Arithmetic => "Arithmetic",
            Self::Overflow => "Overflow",
            Self::Reference => "Reference",
        };
        write!(f, "{name}")
    }
}

/// Any diagnostic the compiler can report.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Raised while tokenizing, splitting or parsing.
    Parse(ParseError),
    /// Raised while computing the type or value of an instruction.
    Runtime(RuntimeError),
    /// A diagnostic that escaped one instruction of a batch.
    Instruction {
        /// 1-based position of the instruction.
        position: usize,
        /// Number of instructions in the batch.
        total:    usize,
        /// The wrapped diagnostic.
        source:   Box<Self>,
    },
}

impl Error {
    /// Returns the category of the diagnostic, looking through instruction
    /// wrappers.
    ///
    /// # Example
    /// ```
    /// use hulk::error::{Category, Error, RuntimeError};
    ///
    /// let error = Error::from(RuntimeError::UninitializedVariable { name: "x".to_string() });
    /// let wrapped = error.in_instruction(2, 3);
    ///
    /// assert_eq!(wrapped.category(), Category::Reference);
    /// assert_eq!(wrapped.to_string(),
    ///            "Instruction 2 of 3: Reference error: variable 'x' is used before it is initialized.");
    /// ```
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::Parse(e) => e.category(),
            Self::Runtime(e) => e.category(),
            Self::Instruction { source, .. } => source.category(),
        }
    }

    /// Wraps the diagnostic with the position of the instruction it escaped.
    #[must_use]
    pub fn in_instruction(self, position: usize, total: usize) -> Self {
        Self::Instruction { position,
                            total,
                            source: Box::new(self) }
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{} error: {e}", e.category()),
            Self::Runtime(e) => write!(f, "{} error: {e}", e.category()),
            Self::Instruction { position,
                                total,
                                source, } => {
                write!(f, "Instruction {position} of {total}: {source}")
            },
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
            Self::Instruction { source, .. } => Some(source.as_ref()),
        }
    }
}
