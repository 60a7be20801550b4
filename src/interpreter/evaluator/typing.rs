use crate::{
    ast::{BinaryOperator, Expr, OperatorClass, SlotRef},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Kind,
    },
};

impl Context<'_> {
    /// Computes the static kind of an expression.
    ///
    /// Operand kinds are checked against what each operator accepts; a
    /// [`Kind::Dynamic`] operand defers the check to evaluation. Calls of user
    /// functions enter the function's depth counter, so typing unbounded
    /// recursion fails with [`RuntimeError::StackOverflow`] instead of
    /// recursing forever.
    ///
    /// # Example
    /// ```
    /// use hulk::{
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::{evaluator::core::Context, memory::Memory, value::core::Kind},
    /// };
    ///
    /// let memory = Memory::new();
    /// let context = Context::probe(&memory);
    /// let comparison = Expr::BinaryOp { left:  Box::new(Expr::Literal { value: 1.0.into() }),
    ///                                   op:    BinaryOperator::Less,
    ///                                   right: Box::new(Expr::Literal { value: 2.0.into() }), };
    /// assert_eq!(context.compute_type(&comparison), Ok(Kind::Boolean));
    ///
    /// let mismatch = Expr::BinaryOp { left:  Box::new(Expr::Literal { value: 1.0.into() }),
    ///                                 op:    BinaryOperator::Add,
    ///                                 right: Box::new(Expr::Literal { value: "a".into() }), };
    /// assert!(context.compute_type(&mismatch).is_err());
    /// ```
    pub fn compute_type(&self, expr: &Expr) -> EvalResult<Kind> {
        match expr {
            Expr::Literal { value } => Ok(value.kind()),
            Expr::Variable(reference) => Ok(self.memory.slot_kind(reference.slot)),
            Expr::UnaryOp { op, expr } => {
                let kind = self.compute_type(expr)?;
                expect(&format!("operator '{op}'"), op.input_kind(), kind)?;
                Ok(op.output_kind())
            },
            Expr::BinaryOp { left, op, right } => {
                let lhs = self.compute_type(left)?;
                let rhs = self.compute_type(right)?;
                binary_kind(*op, lhs, rhs)
            },
            Expr::Assignment { targets, value } => {
                let kind = self.compute_type(value)?;
                self.assignment_kind(targets, kind)
            },
            Expr::FunctionCall { function,
                                 arguments,
                                 .. } => self.call_kind(*function, arguments),
            Expr::PrintCall { argument } => self.compute_type(argument),
            Expr::FunctionDeclaration { .. } => Ok(Kind::Void),
            Expr::LetIn { declarations, body } => {
                // Dependent initializers only run when read.
                for declaration in declarations.iter().filter(|d| !d.dependent) {
                    let kind = self.compute_type(&declaration.initializer)?;
                    expect(&format!("variable '{}'", declaration.name), declaration.kind, kind)?;
                }
                self.compute_type(body)
            },
            Expr::IfElse { condition,
                           then_branch,
                           else_branch, } => {
                let kind = self.compute_type(condition)?;
                expect("if condition", Kind::Boolean, kind)?;
                match (self.compute_type(then_branch), self.compute_type(else_branch)) {
                    (Ok(then_kind), Ok(else_kind)) => Ok(then_kind.unify(else_kind)),
                    (Err(RuntimeError::StackOverflow { .. }), Ok(kind))
                    | (Ok(kind), Err(RuntimeError::StackOverflow { .. })) => Ok(kind),
                    (Err(e), _) | (_, Err(e)) => Err(e),
                }
            },
        }
    }

    fn assignment_kind(&self, targets: &[SlotRef], kind: Kind) -> EvalResult<Kind> {
        let mut common = kind;
        for target in targets {
            let slot_kind = self.memory.slot_kind(target.slot);
            expect(&format!("assignment to '{}'", target.name), slot_kind, common)?;
            if common == Kind::Dynamic {
                common = slot_kind;
            }
        }
        Ok(kind)
    }
}

/// The result kind of a binary operator applied to operands of the given
/// kinds.
fn binary_kind(op: BinaryOperator, lhs: Kind, rhs: Kind) -> EvalResult<Kind> {
    let expression = format!("operator '{op}'");

    match op.class() {
        OperatorClass::Arithmetic | OperatorClass::Relational => {
            expect(&expression, Kind::Number, lhs)?;
            expect(&expression, Kind::Number, rhs)?;
        },
        OperatorClass::Logical => {
            expect(&expression, Kind::Boolean, lhs)?;
            expect(&expression, Kind::Boolean, rhs)?;
        },
        OperatorClass::Equality => expect(&expression, lhs, rhs)?,
        OperatorClass::Concatenation => {
            for kind in [lhs, rhs] {
                if kind == Kind::Void {
                    return Err(RuntimeError::TypeMismatch { expression,
                                                            expected: Kind::Text,
                                                            received: kind });
                }
            }
        },
    }

    Ok(op.output_kind())
}

fn expect(expression: &str, expected: Kind, received: Kind) -> EvalResult<()> {
    if expected.accepts(received) {
        Ok(())
    } else {
        Err(RuntimeError::TypeMismatch { expression: expression.to_string(),
                                         expected,
                                         received })
    }
}
