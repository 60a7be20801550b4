/// Variable slots.
///
/// A slot is one mutable storage cell: a function parameter, a `let` binding
/// or the target of an assignment.
pub mod slot;

/// Function declarations and their call-depth guard.
pub mod function;

use std::{cell::RefCell, collections::HashMap, rc::Rc};

pub use function::{DepthGuard, FunctionDeclaration};
use log::trace;
pub use slot::{Slot, SlotContent};

use crate::{
    ast::Expr,
    error::{ParseError, RuntimeError},
    interpreter::{
        evaluator::core::EvalResult,
        parser::core::ParseResult,
        value::core::{Kind, Value},
    },
};

/// Handle of a slot in the session's slot arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

/// Handle of a function in the session's function arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(usize);

/// Arena sizes recorded before an instruction, see [`Memory::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    slots:     usize,
    functions: usize,
}

/// The state of one compilation session.
///
/// Slots live in a `RefCell` because evaluation writes them through a shared
/// borrow of the memory; the function arena only grows while parsing, which
/// holds the memory mutably.
#[derive(Debug, Default)]
pub struct Memory {
    slots:     RefCell<Vec<Slot>>,
    functions: Vec<FunctionDeclaration>,
    names:     HashMap<String, FunctionId>,
    order:     Vec<FunctionId>,
}

impl Memory {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new slot and returns its handle.
    pub fn allocate(&self, slot: Slot) -> SlotId {
        let mut slots = self.slots.borrow_mut();
        slots.push(slot);
        SlotId(slots.len() - 1)
    }

    /// Returns the declared kind of a slot.
    #[must_use]
    pub fn slot_kind(&self, id: SlotId) -> Kind {
        self.slots.borrow()[id.0].kind
    }

    /// Returns `true` if reads of the slot must never be cached.
    #[must_use]
    pub fn is_dependent(&self, id: SlotId) -> bool {
        self.slots.borrow()[id.0].dependent
    }

    /// Returns a copy of the slot's current content.
    ///
    /// The content is cloned so the caller may evaluate a dependent
    /// expression, which may itself write other slots.
    #[must_use]
    pub fn content(&self, id: SlotId) -> SlotContent {
        self.slots.borrow()[id.0].content.clone()
    }

    /// Writes a value into a slot after checking it against the slot's kind.
    pub fn write(&self, id: SlotId, value: Value) -> EvalResult<()> {
        self.slots.borrow_mut()[id.0].write(value)
    }

    /// Replaces the slot's content without a kind check and returns the
    /// previous content.
    pub fn replace(&self, id: SlotId, content: SlotContent) -> SlotContent {
        std::mem::replace(&mut self.slots.borrow_mut()[id.0].content, content)
    }

    /// Points a dependent `let` slot at its initializer.
    pub fn bind(&self, id: SlotId, initializer: Rc<Expr>) {
        self.replace(id, SlotContent::Dependent(initializer));
    }

    /// Creates a pending function with one parameter slot per name.
    ///
    /// The function is not visible by name until it is
    /// [registered](Self::register).
    ///
    /// # Errors
    /// A parameter named twice is a [`ParseError::DuplicateParameter`].
    pub fn declare_function(&mut self,
                            name: &str,
                            parameters: Vec<String>)
                            -> ParseResult<FunctionId> {
        let start = self.slots.get_mut().len();
        let mut slots = HashMap::new();
        let mut parameter_slots = Vec::with_capacity(parameters.len());

        for parameter in &parameters {
            if slots.contains_key(parameter) {
                return Err(ParseError::DuplicateParameter { function: name.to_string(),
                                                            name:     parameter.clone(), });
            }
            let id = self.allocate(Slot::parameter(parameter));
            slots.insert(parameter.clone(), id);
            parameter_slots.push(id);
        }

        let end = self.slots.get_mut().len();
        self.functions.push(FunctionDeclaration::new(name,
                                                     parameters,
                                                     slots,
                                                     parameter_slots,
                                                     start..end));
        trace!("declared pending function '{name}'");
        Ok(FunctionId(self.functions.len() - 1))
    }

    /// Returns the declaration behind a handle.
    #[must_use]
    pub fn function(&self, id: FunctionId) -> &FunctionDeclaration {
        &self.functions[id.0]
    }

    /// Attaches a parsed body. The function's frame grows to cover every
    /// slot allocated while the body was parsed.
    pub fn attach_body(&mut self, id: FunctionId, body: Expr) {
        let end = self.slots.get_mut().len();
        self.functions[id.0].attach(body, end);
    }

    /// Handles of every slot in a function's frame.
    #[must_use]
    pub fn frame(&self, id: FunctionId) -> Vec<SlotId> {
        self.functions[id.0].frame.clone().map(SlotId).collect()
    }

    /// Looks up a registered function by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<FunctionId> {
        self.names.get(name).copied()
    }

    /// Makes a declared function callable by name.
    ///
    /// # Errors
    /// A second function with the same name is a
    /// [`RuntimeError::FunctionAlreadyDefined`].
    pub fn register(&mut self, id: FunctionId) -> EvalResult<()> {
        let name = self.functions[id.0].name.clone();
        if self.names.contains_key(&name) {
            return Err(RuntimeError::FunctionAlreadyDefined { name });
        }
        self.names.insert(name, id);
        self.order.push(id);
        Ok(())
    }

    /// Iterates over the registered functions as `(name, parameters)`, in
    /// registration order.
    pub fn functions(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.order.iter().map(|id| {
                             let function = &self.functions[id.0];
                             (function.name.as_str(), function.parameters.as_slice())
                         })
    }

    /// Records the current arena sizes.
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint { slots:     self.slots.borrow().len(),
                     functions: self.functions.len(), }
    }

    /// Releases every slot and pending function allocated after `checkpoint`.
    ///
    /// Only call this for instructions that registered nothing: handles held
    /// by registered functions must stay valid.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.functions.truncate(checkpoint.functions);
        self.slots.get_mut().truncate(checkpoint.slots);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_parameters_are_rejected() {
        let mut memory = Memory::new();
        let result = memory.declare_function("f", vec!["a".to_string(), "a".to_string()]);
        assert!(matches!(result, Err(ParseError::DuplicateParameter { .. })));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut memory = Memory::new();
        let first = memory.declare_function("f", vec![]).unwrap();
        let second = memory.declare_function("f", vec![]).unwrap();
        assert!(memory.register(first).is_ok());
        assert!(matches!(memory.register(second),
                         Err(RuntimeError::FunctionAlreadyDefined { .. })));
        assert_eq!(memory.functions().count(), 1);
    }

    #[test]
    fn restore_releases_unregistered_storage() {
        let mut memory = Memory::new();
        let kept = memory.declare_function("f", vec!["x".to_string()]).unwrap();
        memory.register(kept).unwrap();

        let checkpoint = memory.checkpoint();
        memory.allocate(Slot::local("y", Kind::Number));
        memory.declare_function("g", vec!["z".to_string()]).unwrap();
        memory.restore(checkpoint);

        assert_eq!(memory.checkpoint(), checkpoint);
        assert_eq!(memory.lookup("f"), Some(kept));
    }

    #[test]
    fn writes_are_checked_against_the_slot_kind() {
        let memory = Memory::new();
        let id = memory.allocate(Slot::local("x", Kind::Number));
        assert!(memory.write(id, Value::Number(1.0)).is_ok());
        assert!(memory.write(id, Value::Boolean(true)).is_err());
        assert_eq!(memory.content(id), SlotContent::Value(Value::Number(1.0)));
    }
}
