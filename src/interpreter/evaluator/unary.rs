use crate::{
    ast::UnaryOperator,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Not`: boolean negation.
    /// - `Plus`, `Negate`: numeric identity and negation.
    /// - `Sqrt`, `Sin`, `Cos`, `Exp`: the one-argument built-ins. The square
    ///   root of a negative number is `NaN`.
    ///
    /// An operand of the wrong kind is reported with the operator, the kind
    /// it accepts and the kind it received.
    ///
    /// # Example
    /// ```
    /// use hulk::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Number(5.0)).unwrap();
    /// assert_eq!(v, Value::Number(-5.0));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Not, &Value::Boolean(false)).unwrap();
    /// assert_eq!(v, Value::Boolean(true));
    ///
    /// assert!(Context::eval_unary(UnaryOperator::Sqrt, &Value::Boolean(true)).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> EvalResult<Value> {
        let expression = format!("operator '{op}'");

        if op == UnaryOperator::Not {
            return Ok(Value::Boolean(!value.as_boolean(&expression)?));
        }

        let n = value.as_number(&expression)?;
        let result = match op {
            UnaryOperator::Plus => n,
            UnaryOperator::Negate => -n,
            UnaryOperator::Sqrt => n.sqrt(),
            UnaryOperator::Sin => n.sin(),
            UnaryOperator::Cos => n.cos(),
            UnaryOperator::Exp => n.exp(),
            UnaryOperator::Not => unreachable!(),
        };
        Ok(Value::Number(result))
    }
}
