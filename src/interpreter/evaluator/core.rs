use std::cell::RefCell;

use crate::{
    ast::{Expr, VariableDeclaration},
    error::RuntimeError,
    interpreter::{
        memory::{Memory, SlotContent},
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Maximum number of simultaneously active calls of one function.
pub const MAX_CALL_DEPTH: usize = 128;

/// Whether an evaluation may have observable effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Compute the value only: `print` stays silent and `:=` writes nothing.
    Probe,
    /// Compute the value and commit every side effect.
    Run,
}

/// Stores the evaluation context of one instruction.
///
/// The context borrows the session memory; slots are written through the
/// memory's interior mutability. Output produced by `print` goes to the
/// host callback, if there is one.
///
/// ## Usage
///
/// A probing context is used while parsing, to precompute `let` initializers
/// and to check declarations. The compiler creates a running context with
/// the host callback for every expression instruction.
pub struct Context<'m> {
    /// The session memory.
    pub memory: &'m Memory,
    output:     RefCell<Option<&'m mut dyn FnMut(&str)>>,
}

impl<'m> Context<'m> {
    /// Creates a context that prints through `output`.
    pub fn new(memory: &'m Memory, output: &'m mut dyn FnMut(&str)) -> Self {
        Self { memory,
               output: RefCell::new(Some(output)) }
    }

    /// Creates a context without output, for probing.
    #[must_use]
    pub const fn probe(memory: &'m Memory) -> Self {
        Self { memory,
               output: RefCell::new(None) }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// The evaluator dispatches based on expression variant: literals,
    /// variables, unary and binary operations, assignments, calls, `print`,
    /// declarations, `let` blocks and conditionals.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `mode`: Whether side effects are committed.
    ///
    /// # Returns
    /// The value of the expression; declarations yield [`Value::Void`].
    pub fn evaluate(&self, expr: &Expr, mode: Mode) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value } => Ok(value.clone()),
            Expr::Variable(reference) => match self.memory.content(reference.slot) {
                SlotContent::Uninitialized => {
                    Err(RuntimeError::UninitializedVariable { name: reference.name.clone() })
                },
                SlotContent::Value(value) => Ok(value),
                SlotContent::Dependent(initializer) => self.evaluate(&initializer, mode),
            },
            Expr::UnaryOp { op, expr } => {
                let value = self.evaluate(expr, mode)?;
                Self::eval_unary(*op, &value)
            },
            Expr::BinaryOp { left, op, right } => self.eval_binary_op(left, *op, right, mode),
            Expr::Assignment { targets, value } => {
                let value = self.evaluate(value, mode)?;
                if mode == Mode::Run {
                    for target in targets {
                        self.memory.write(target.slot, value.clone())?;
                    }
                }
                Ok(value)
            },
            Expr::FunctionCall { function,
                                 arguments,
                                 .. } => self.eval_call(*function, arguments, mode),
            Expr::PrintCall { argument } => {
                let value = self.evaluate(argument, mode)?;
                if mode == Mode::Run
                   && let Some(output) = self.output.borrow_mut().as_mut()
                {
                    output(&value.to_string());
                }
                Ok(value)
            },
            Expr::FunctionDeclaration { .. } => Ok(Value::Void),
            Expr::LetIn { declarations, body } => {
                self.bind_declarations(declarations, mode)?;
                self.evaluate(body, mode)
            },
            Expr::IfElse { condition,
                           then_branch,
                           else_branch, } => {
                if self.evaluate(condition, mode)?.as_boolean("if condition")? {
                    self.evaluate(then_branch, mode)
                } else {
                    self.evaluate(else_branch, mode)
                }
            },
        }
    }

    /// Fills the slots of a `let` block in declaration order.
    ///
    /// Dependent bindings are pointed back at their initializer, since an
    /// assignment in an earlier evaluation may have replaced it with a value.
    fn bind_declarations(&self,
                         declarations: &[VariableDeclaration],
                         mode: Mode)
                         -> EvalResult<()> {
        for declaration in declarations {
            if declaration.dependent {
                self.memory.bind(declaration.slot, declaration.initializer.clone());
            } else {
                let value = self.evaluate(&declaration.initializer, mode)?;
                self.memory.write(declaration.slot, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::BinaryOperator,
        interpreter::memory::Slot,
        interpreter::value::core::Kind,
    };

    fn number(n: f64) -> Box<Expr> {
        Box::new(Expr::Literal { value: Value::Number(n) })
    }

    #[test]
    fn probing_never_prints() {
        let memory = Memory::new();
        let mut printed = Vec::new();
        let mut output = |s: &str| printed.push(s.to_string());
        let print = Expr::PrintCall { argument: number(3.0) };

        {
            let context = Context::new(&memory, &mut output);
            assert_eq!(context.evaluate(&print, Mode::Probe), Ok(Value::Number(3.0)));
            assert_eq!(context.evaluate(&print, Mode::Run), Ok(Value::Number(3.0)));
        }

        assert_eq!(printed, vec!["3".to_string()]);
    }

    #[test]
    fn probing_never_assigns() {
        let memory = Memory::new();
        let slot = memory.allocate(Slot::local("x", Kind::Number));
        let target = crate::ast::SlotRef { name: "x".to_string(),
                                           slot,
                                           dependent: false };
        let assignment = Expr::Assignment { targets: vec![target],
                                            value:   number(4.0), };
        let context = Context::probe(&memory);

        assert_eq!(context.evaluate(&assignment, Mode::Probe), Ok(Value::Number(4.0)));
        assert_eq!(memory.content(slot), SlotContent::Uninitialized);

        assert_eq!(context.evaluate(&assignment, Mode::Run), Ok(Value::Number(4.0)));
        assert_eq!(memory.content(slot), SlotContent::Value(Value::Number(4.0)));
    }

    #[test]
    fn short_circuit_skips_the_right_operand() {
        let memory = Memory::new();
        let division = Expr::BinaryOp { left:  number(1.0),
                                        op:    BinaryOperator::Div,
                                        right: number(0.0), };
        let guard = Expr::BinaryOp { left:  Box::new(Expr::Literal { value: false.into() }),
                                     op:    BinaryOperator::And,
                                     right: Box::new(Expr::BinaryOp { left:  Box::new(division),
                                                                      op:    BinaryOperator::Equal,
                                                                      right: number(1.0), }), };
        let context = Context::probe(&memory);

        assert_eq!(context.evaluate(&guard, Mode::Run), Ok(Value::Boolean(false)));
    }
}
