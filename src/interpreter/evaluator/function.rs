use log::trace;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, MAX_CALL_DEPTH, Mode},
        memory::{FunctionDeclaration, FunctionId, Memory, SlotContent, SlotId},
        value::core::{Kind, Value},
    },
};

/// Binds argument values to a function's parameter slots for one call.
///
/// Every slot of the function's frame is saved when the frame is created and
/// restored, innermost first, when it is dropped. Recursive calls therefore
/// nest cleanly, including when the body fails.
struct CallFrame<'m> {
    memory: &'m Memory,
    saved:  Vec<(SlotId, SlotContent)>,
}

impl<'m> CallFrame<'m> {
    fn bind(memory: &'m Memory,
            id: FunctionId,
            function: &FunctionDeclaration,
            arguments: Vec<Value>)
            -> EvalResult<Self> {
        let saved = memory.frame(id)
                          .into_iter()
                          .map(|slot| (slot, memory.content(slot)))
                          .collect();
        let frame = Self { memory, saved };

        for (slot, value) in function.parameter_slots.iter().zip(arguments) {
            memory.write(*slot, value)?;
        }
        trace!("entered '{}' at depth {}", function.name, function.depth());
        Ok(frame)
    }
}

impl Drop for CallFrame<'_> {
    fn drop(&mut self) {
        for (slot, content) in self.saved.drain(..).rev() {
            self.memory.replace(slot, content);
        }
    }
}

impl Context<'_> {
    /// Evaluates a call of a user-defined function.
    ///
    /// Arguments are evaluated left to right in [`Mode::Probe`], so they never
    /// print or assign. The body is evaluated in the caller's mode with
    /// the arguments bound to the parameter slots; the previous contents of
    /// the slots are restored afterwards, on success and on failure.
    ///
    /// # Errors
    /// - [`RuntimeError::ArgumentCountMismatch`] if the arity differs.
    /// - [`RuntimeError::IncompleteFunction`] if the body is not attached yet.
    /// - [`RuntimeError::StackOverflow`] past the call-depth limit.
    pub fn eval_call(&self, id: FunctionId, arguments: &[Expr], mode: Mode) -> EvalResult<Value> {
        let function = self.memory.function(id);
        check_arity(function, arguments)?;

        let values = arguments.iter()
                              .map(|argument| self.evaluate(argument, Mode::Probe))
                              .collect::<EvalResult<Vec<_>>>()?;

        let body =
            function.body()
                    .ok_or_else(|| RuntimeError::IncompleteFunction { function: function.name.clone() })?;

        let _depth = function.enter()?;
        let _frame = CallFrame::bind(self.memory, id, function, values)?;
        self.evaluate(body, mode)
    }

    /// Computes the kind of a call of a user-defined function.
    ///
    /// The return kind is memoized on the declaration once known, and so is
    /// an overflow, which keeps typing linear in the call-depth limit even
    /// when every branch of the body recurses. A call of the function whose
    /// body is still being parsed is [`Kind::Dynamic`].
    pub(crate) fn call_kind(&self, id: FunctionId, arguments: &[Expr]) -> EvalResult<Kind> {
        let function = self.memory.function(id);
        check_arity(function, arguments)?;

        for argument in arguments {
            self.compute_type(argument)?;
        }

        if let Some(kind) = function.return_kind() {
            return Ok(kind);
        }
        let Some(body) = function.body() else {
            return Ok(Kind::Dynamic);
        };
        if function.overflowed() {
            return Err(RuntimeError::StackOverflow { function: function.name.clone(),
                                                     limit:    MAX_CALL_DEPTH, });
        }

        let _depth = function.enter()?;
        match self.compute_type(body) {
            Ok(kind) => {
                function.set_return_kind(kind);
                Ok(kind)
            },
            Err(e) => {
                if matches!(e, RuntimeError::StackOverflow { .. }) {
                    trace!("typing '{}' overflowed at depth {}", function.name, function.depth());
                    function.mark_overflowed();
                }
                Err(e)
            },
        }
    }

    /// Computes and memoizes the return kind of a function that has just been
    /// declared.
    ///
    /// The body is typed inside one call frame of the function, so recursion
    /// through the body is bounded by the same limit as evaluation.
    pub fn declaration_kind(&self, id: FunctionId) -> EvalResult<Kind> {
        let function = self.memory.function(id);
        let Some(body) = function.body() else {
            return Err(RuntimeError::IncompleteFunction { function: function.name.clone() });
        };

        let kind = {
            let _depth = function.enter()?;
            self.compute_type(body)?
        };
        function.set_return_kind(kind);
        Ok(kind)
    }
}

fn check_arity(function: &FunctionDeclaration, arguments: &[Expr]) -> EvalResult<()> {
    if function.parameters.len() == arguments.len() {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { function: function.name.clone(),
                                                  expected: function.parameters.len(),
                                                  found:    arguments.len(), })
    }
}
