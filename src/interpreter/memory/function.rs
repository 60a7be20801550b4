use std::{
    cell::Cell,
    collections::HashMap,
    ops::Range,
};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, MAX_CALL_DEPTH},
        memory::SlotId,
        value::core::Kind,
    },
};

/// A user-defined function.
///
/// The declaration owns the call-depth counter for its own calls; every
/// entry, whether evaluating or computing a kind, goes through
/// [`enter`](Self::enter).
#[derive(Debug)]
pub struct FunctionDeclaration {
    /// The function name.
    pub name:            String,
    /// Parameter names in declaration order.
    pub parameters:      Vec<String>,
    /// Parameter name to slot.
    pub slots:           HashMap<String, SlotId>,
    /// Parameter slots in declaration order.
    pub parameter_slots: Vec<SlotId>,
    /// Every slot allocated for the function: its parameters and the `let`
    /// bindings of its body.
    pub(crate) frame:    Range<usize>,
    body:                Option<Expr>,
    return_kind:         Cell<Option<Kind>>,
    overflowed:          Cell<bool>,
    depth:               Cell<usize>,
}

impl FunctionDeclaration {
    pub(crate) fn new(name: &str,
                      parameters: Vec<String>,
                      slots: HashMap<String, SlotId>,
                      parameter_slots: Vec<SlotId>,
                      frame: Range<usize>)
                      -> Self {
        Self { name: name.to_string(),
               parameters,
               slots,
               parameter_slots,
               frame,
               body: None,
               return_kind: Cell::new(None),
               overflowed: Cell::new(false),
               depth: Cell::new(0) }
    }

    /// The body, once it has been parsed.
    #[must_use]
    pub const fn body(&self) -> Option<&Expr> {
        self.body.as_ref()
    }

    pub(crate) fn attach(&mut self, body: Expr, frame_end: usize) {
        self.body = Some(body);
        self.frame.end = frame_end;
    }

    /// The memoized return kind, if it has been computed.
    #[must_use]
    pub fn return_kind(&self) -> Option<Kind> {
        self.return_kind.get()
    }

    pub(crate) fn set_return_kind(&self, kind: Kind) {
        self.return_kind.set(Some(kind));
    }

    /// Returns `true` once typing the body has overflowed the call stack.
    ///
    /// Typing does not depend on argument values, so every later attempt
    /// without a memoized kind would overflow the same way.
    #[must_use]
    pub fn overflowed(&self) -> bool {
        self.overflowed.get()
    }

    pub(crate) fn mark_overflowed(&self) {
        self.overflowed.set(true);
    }

    /// The number of calls currently active.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Enters one call.
    ///
    /// # Errors
    /// [`RuntimeError::StackOverflow`] when [`MAX_CALL_DEPTH`] calls are
    /// already active.
    pub fn enter(&self) -> EvalResult<DepthGuard<'_>> {
        let depth = self.depth.get();
        if depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::StackOverflow { function: self.name.clone(),
                                                     limit:    MAX_CALL_DEPTH, });
        }
        self.depth.set(depth + 1);
        Ok(DepthGuard { depth: &self.depth })
    }
}

/// Leaves the call entered by [`FunctionDeclaration::enter`] when dropped.
#[derive(Debug)]
pub struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}
