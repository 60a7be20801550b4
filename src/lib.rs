//! # hulk
//!
//! hulk is an interpreter for a small, expression-oriented language written
//! in Rust. It tokenizes, parses, type checks and evaluates source lines
//! with support for numbers, booleans and strings, built-in math functions,
//! recursive user functions, `let` bindings, conditionals, destructive
//! assignment and `print`.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{cell::RefCell, rc::Rc};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and the operator types that
/// represent one instruction as a tree. Names in the tree are already
/// resolved to slot and function handles.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines every diagnostic that can be raised while lexing,
/// splitting, parsing or evaluating code, and the closed category taxonomy
/// they are reported under.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Wraps diagnostics with the position of the instruction they escaped.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the phases of code execution.
///
/// This module ties together lexing, splitting, parsing, evaluation and the
/// session memory.
pub mod interpreter;
/// The compiler façade.
///
/// Owns a session and runs source lines against it one instruction at a
/// time, isolating the failure of each instruction.
pub mod kompiler;

pub use kompiler::Kompiler;

use crate::error::Error;

/// Runs a script in a fresh session and returns everything it printed.
///
/// Each line of `source` is compiled in order in the same session, so a line
/// can call the functions declared by the lines before it.
///
/// # Errors
/// Returns the first diagnostic raised by any instruction.
///
/// # Examples
/// ```
/// use hulk::get_result;
///
/// let source = "function fact(n) => if (n <= 1) 1 else n * fact(n - 1);\nprint(fact(5));";
/// assert_eq!(get_result(source).unwrap(), vec!["120".to_string()]);
///
/// // 'x' is not defined.
/// assert!(get_result("print(x + 1);").is_err());
/// ```
pub fn get_result(source: &str) -> Result<Vec<String>, Error> {
    let printed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&printed);
    let mut kompiler = Kompiler::new(move |text| sink.borrow_mut().push(text.to_string()));

    for line in source.lines() {
        for result in kompiler.compile(line) {
            result?;
        }
    }

    let output = printed.borrow().clone();
    Ok(output)
}
