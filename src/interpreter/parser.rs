/// Binary operator parsing.
///
/// Locates the split point of each precedence level, the power operator and
/// destructive assignment.
pub mod binary;

/// Core parser entry points and the precedence cascade.
pub mod core;

/// Name resolution against the scope stack and the session memory.
pub mod scope;

/// Statement forms: function declarations, `let` and `if`.
pub mod statement;

/// Unary operators, parentheses, literals, calls and built-ins.
pub mod unary;

/// Utility functions for the parser.
///
/// Provides window scanning helpers, list splitting and identifier checks
/// shared by the parser modules.
pub mod utils;
