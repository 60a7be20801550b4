use std::rc::Rc;

use crate::{
    ast::Expr,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{Kind, Value},
    },
};

/// The current content of a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotContent {
    /// Declared but never written.
    Uninitialized,
    /// A fixed value.
    Value(Value),
    /// A reference to an initializer that depends on a parameter, evaluated
    /// on every read.
    Dependent(Rc<Expr>),
}

/// A mutable storage cell with a fixed declared kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// The name the slot was declared with.
    pub name:      String,
    /// The declared kind; every written value is checked against it.
    pub kind:      Kind,
    /// Whether reads of this slot must never be cached.
    pub dependent: bool,
    /// The content.
    pub content:   SlotContent,
}

impl Slot {
    /// A parameter slot. Parameters have no declared type, so their kind is
    /// [`Kind::Dynamic`].
    #[must_use]
    pub fn parameter(name: &str) -> Self {
        Self { name:      name.to_string(),
               kind:      Kind::Dynamic,
               dependent: true,
               content:   SlotContent::Uninitialized, }
    }

    /// An uninitialized `let` binding of the given kind.
    #[must_use]
    pub fn local(name: &str, kind: Kind) -> Self {
        Self { name: name.to_string(),
               kind,
               dependent: false,
               content: SlotContent::Uninitialized }
    }

    /// Stores a value after checking it against the declared kind.
    pub fn write(&mut self, value: Value) -> EvalResult<()> {
        value.expect_kind(&format!("variable '{}'", self.name), self.kind)?;
        self.content = SlotContent::Value(value);
        Ok(())
    }
}
