/// The evaluator module computes the kind and the value of AST nodes.
///
/// Evaluation and type checking are two operations on every node, driven by
/// the compiler one instruction at a time. Both run under an explicit
/// [`Mode`](evaluator::core::Mode): probing never prints and never assigns.
///
/// # Responsibilities
/// - Computes static kinds, deferring to evaluation where a kind is dynamic.
/// - Evaluates operators, built-ins, conditionals, `let` blocks and calls.
/// - Guards every call with a depth counter and restores parameter slots on
///   every exit path.
pub mod evaluator;
/// The lexer module tokenizes a source line.
///
/// The lexer produces the ordered token list for one line. It performs no
/// semantic validation: numbers and names are plain words until the parser
/// classifies them.
pub mod lexer;
/// Session state shared by the parser and the evaluator.
///
/// Holds the slot arena, the function arena and the table of registered
/// function names.
pub mod memory;
/// The parser module builds one AST per instruction.
///
/// The parser works on windows of the token slice and tries each precedence
/// level in turn. Identifiers are resolved to slot and function handles while
/// parsing, against the scope stack and the session memory.
///
/// # Responsibilities
/// - Dispatches statement forms: function declarations, `let`, `if`.
/// - Locates binary operators at the top level of a window, honouring
///   precedence and associativity.
/// - Reports missing operands, malformed lists, unmatched parentheses and
///   unresolved names.
pub mod parser;
/// Splits a token list into semicolon-delimited instructions.
pub mod splitter;
/// The value module defines runtime values and their kinds.
pub mod value;
