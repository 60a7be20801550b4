use crate::{
    ast::{BinaryOperator, Expr, OperatorClass},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Mode},
        value::core::{Kind, Value},
    },
};

impl Context<'_> {
    /// Evaluates a binary operation node.
    ///
    /// `&&` and `||` evaluate their right operand only when the left one does
    /// not decide the result. Every other operator evaluates both operands,
    /// left first, and applies [`eval_binary`](Self::eval_binary).
    pub fn eval_binary_op(&self,
                          left: &Expr,
                          op: BinaryOperator,
                          right: &Expr,
                          mode: Mode)
                          -> EvalResult<Value> {
        match op {
            BinaryOperator::And | BinaryOperator::Or => {
                let expression = format!("operator '{op}'");
                let lhs = self.evaluate(left, mode)?.as_boolean(&expression)?;
                if lhs == (op == BinaryOperator::Or) {
                    return Ok(Value::Boolean(lhs));
                }
                let rhs = self.evaluate(right, mode)?.as_boolean(&expression)?;
                Ok(Value::Boolean(rhs))
            },
            _ => {
                let lhs = self.evaluate(left, mode)?;
                let rhs = self.evaluate(right, mode)?;
                Self::eval_binary(op, &lhs, &rhs)
            },
        }
    }

    /// Applies a binary operator to two values.
    ///
    /// Arithmetic, relational and logical operators require operands of the
    /// kind their class accepts. Equality requires both operands to be of the
    /// same kind. Concatenation accepts any two values and joins their
    /// display forms.
    ///
    /// # Errors
    /// - [`RuntimeError::DivisionByZero`] for `/` and `%` with a zero divisor.
    /// - [`RuntimeError::TypeMismatch`] for operands of the wrong kind.
    ///
    /// # Example
    /// ```
    /// use hulk::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_binary(BinaryOperator::Pow, &2.0.into(), &10.0.into()).unwrap();
    /// assert_eq!(v, Value::Number(1024.0));
    ///
    /// let v = Context::eval_binary(BinaryOperator::SpacedConcat, &"n =".into(), &2.0.into());
    /// assert_eq!(v.unwrap(), Value::from("n = 2"));
    ///
    /// assert!(Context::eval_binary(BinaryOperator::Mod, &1.0.into(), &0.0.into()).is_err());
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        let expression = format!("operator '{op}'");

        match op.class() {
            OperatorClass::Arithmetic => {
                let a = left.as_number(&expression)?;
                let b = right.as_number(&expression)?;
                Self::eval_arithmetic(op, a, b)
            },
            OperatorClass::Logical => {
                let a = left.as_boolean(&expression)?;
                let b = right.as_boolean(&expression)?;
                match op {
                    BinaryOperator::And | BinaryOperator::EagerAnd => Ok(Value::Boolean(a && b)),
                    BinaryOperator::Or | BinaryOperator::EagerOr => Ok(Value::Boolean(a || b)),
                    _ => unreachable!(),
                }
            },
            OperatorClass::Relational => {
                let a = left.as_number(&expression)?;
                let b = right.as_number(&expression)?;
                let result = match op {
                    BinaryOperator::Less => a < b,
                    BinaryOperator::Greater => a > b,
                    BinaryOperator::LessEqual => a <= b,
                    BinaryOperator::GreaterEqual => a >= b,
                    _ => unreachable!(),
                };
                Ok(Value::Boolean(result))
            },
            OperatorClass::Equality => {
                if left.kind() != right.kind() {
                    return Err(RuntimeError::TypeMismatch { expression,
                                                            expected: left.kind(),
                                                            received: right.kind() });
                }
                let equal = left == right;
                Ok(Value::Boolean(if op == BinaryOperator::Equal { equal } else { !equal }))
            },
            OperatorClass::Concatenation => {
                for operand in [left, right] {
                    if operand.kind() == Kind::Void {
                        return Err(RuntimeError::TypeMismatch { expression,
                                                                expected: Kind::Text,
                                                                received: Kind::Void });
                    }
                }
                let separator = if op == BinaryOperator::SpacedConcat { " " } else { "" };
                Ok(Value::Text(format!("{left}{separator}{right}")))
            },
        }
    }

    fn eval_arithmetic(op: BinaryOperator, a: f64, b: f64) -> EvalResult<Value> {
        let result = match op {
            BinaryOperator::Add => a + b,
            BinaryOperator::Sub => a - b,
            BinaryOperator::Mul => a * b,
            BinaryOperator::Div | BinaryOperator::Mod if b == 0.0 => {
                return Err(RuntimeError::DivisionByZero { operator: op });
            },
            BinaryOperator::Div => a / b,
            BinaryOperator::Mod => a % b,
            BinaryOperator::Pow => a.powf(b),
            BinaryOperator::Log => b.ln() / a.ln(),
            _ => unreachable!(),
        };
        Ok(Value::Number(result))
    }
}
