/// Binary operator evaluation.
///
/// Implements arithmetic, logical, relational, equality and concatenation
/// operators, including short-circuiting for `&&` and `||`.
pub mod binary;

/// Core evaluation logic and the evaluation context.
///
/// Contains the result alias, the evaluation mode and the dispatch over
/// every expression variant.
pub mod core;

/// User-defined function calls.
///
/// Handles arity checks, parameter binding with guaranteed restoration, and
/// the kind of a call.
pub mod function;

/// Static kinds of expressions.
pub mod typing;

/// Unary operator and one-argument built-in evaluation.
pub mod unary;
