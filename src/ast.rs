use std::rc::Rc;

use crate::interpreter::{
    memory::{FunctionId, SlotId},
    value::core::{Kind, Value},
};

/// A parse-time resolved reference to a slot.
///
/// Identifiers are resolved once, while parsing; the AST keeps the handle of
/// the slot rather than the name, so evaluation never looks a name up again.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRef {
    /// The name the slot was resolved from.
    pub name:      String,
    /// Handle into the session's slot arena.
    pub slot:      SlotId,
    /// Whether the slot is a function parameter or a dependent `let` binding.
    pub dependent: bool,
}

/// A declaration inside a `let` block.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// The declared name.
    pub name:        String,
    /// The slot backing the binding.
    pub slot:        SlotId,
    /// The declared kind, or the initializer's kind when no type was written.
    pub kind:        Kind,
    /// The initializer. Shared with the slot when the binding is dependent.
    pub initializer: Rc<Expr>,
    /// Whether the initializer depends on a parameter or dependent binding.
    pub dependent:   bool,
}

/// An abstract syntax tree (AST) node.
///
/// Every node can compute its static kind and its value; see
/// [`Context`](crate::interpreter::evaluator::core::Context).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal or a named constant.
    Literal {
        /// The constant value.
        value: Value,
    },
    /// Reference to a variable slot.
    Variable(SlotRef),
    /// A unary operation, including the one-argument built-ins.
    UnaryOp {
        /// The operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
    },
    /// A binary operation, including `log`.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
    },
    /// Destructive assignment `a, b := value`.
    Assignment {
        /// The slots written.
        targets: Vec<SlotRef>,
        /// The assigned expression.
        value:   Box<Self>,
    },
    /// Call of a user-defined function.
    FunctionCall {
        /// The function name.
        name:      String,
        /// Handle into the session's function arena.
        function:  FunctionId,
        /// Argument expressions.
        arguments: Vec<Self>,
        /// Whether the call must be recomputed on every evaluation.
        dependent: bool,
    },
    /// `print(value)`.
    PrintCall {
        /// The printed expression.
        argument: Box<Self>,
    },
    /// `function name(params) => body`, as a whole instruction.
    FunctionDeclaration {
        /// The function name.
        name:     String,
        /// Handle of the declared function.
        function: FunctionId,
    },
    /// `let declarations in body`.
    LetIn {
        /// The declarations, in source order.
        declarations: Vec<VariableDeclaration>,
        /// The body expression.
        body:         Box<Self>,
    },
    /// `if (condition) then_branch else else_branch`.
    IfElse {
        /// The condition.
        condition:   Box<Self>,
        /// Evaluated when the condition holds.
        then_branch: Box<Self>,
        /// Evaluated otherwise.
        else_branch: Box<Self>,
    },
}

impl Expr {
    /// Returns `true` if the expression transitively depends on a function
    /// parameter or a dependent `let` binding, and so must never be cached.
    ///
    /// ## Example
    /// ```
    /// use hulk::ast::Expr;
    ///
    /// let literal = Expr::Literal { value: 2.0.into() };
    /// assert!(!literal.is_dependent());
    /// ```
    #[must_use]
    pub fn is_dependent(&self) -> bool {
        match self {
            Self::Literal { .. } | Self::FunctionDeclaration { .. } => false,
            Self::Variable(reference) => reference.dependent,
            Self::UnaryOp { expr, .. } => expr.is_dependent(),
            Self::BinaryOp { left, right, .. } => left.is_dependent() || right.is_dependent(),
            Self::Assignment { targets, value } => {
                value.is_dependent() || targets.iter().any(|t| t.dependent)
            },
            Self::FunctionCall { dependent, .. } => *dependent,
            Self::PrintCall { argument } => argument.is_dependent(),
            Self::LetIn { declarations, body } => {
                declarations.iter().any(|d| d.dependent) || body.is_dependent()
            },
            Self::IfElse { condition,
                           then_branch,
                           else_branch, } => {
                condition.is_dependent() || then_branch.is_dependent() || else_branch.is_dependent()
            },
        }
    }
}

/// Represents a unary operator or a one-argument built-in function.
///
/// Each operator carries the kind it accepts and the kind it produces.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Logical NOT (`!x`).
    Not,
    /// Unary plus (`+x`).
    Plus,
    /// Arithmetic negation (`-x`).
    Negate,
    /// `sqrt(x)`
    Sqrt,
    /// `sin(x)`
    Sin,
    /// `cos(x)`
    Cos,
    /// `exp(x)`
    Exp,
}

impl UnaryOperator {
    /// The kind of operand the operator accepts.
    #[must_use]
    pub const fn input_kind(self) -> Kind {
        match self {
            Self::Not => Kind::Boolean,
            _ => Kind::Number,
        }
    }

    /// The kind of value the operator produces.
    #[must_use]
    pub const fn output_kind(self) -> Kind {
        self.input_kind()
    }
}

/// Groups binary operators by the kinds they accept and produce.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OperatorClass {
    /// Two numbers to a number.
    Arithmetic,
    /// Two booleans to a boolean.
    Logical,
    /// Two numbers to a boolean.
    Relational,
    /// Two values of the same kind to a boolean.
    Equality,
    /// Two non-void values to a string.
    Concatenation,
}

/// Represents a binary operator or the two-argument built-in `log`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`^`)
    Pow,
    /// Logarithm `log(base, value)`
    Log,
    /// Short-circuit and (`&&`)
    And,
    /// Short-circuit or (`||`)
    Or,
    /// Eager and (`&`)
    EagerAnd,
    /// Eager or (`|`)
    EagerOr,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Concatenation (`@`)
    Concat,
    /// Concatenation with a space (`@@`)
    SpacedConcat,
}

impl BinaryOperator {
    /// Returns the class that determines the operator's operand and result
    /// kinds.
    #[must_use]
    pub const fn class(self) -> OperatorClass {
        use BinaryOperator::{
            Add, And, Concat, Div, EagerAnd, EagerOr, Equal, Greater, GreaterEqual, Less,
            LessEqual, Log, Mod, Mul, NotEqual, Or, Pow, SpacedConcat, Sub,
        };
        match self {
            Add | Sub | Mul | Div | Mod | Pow | Log => OperatorClass::Arithmetic,
            And | Or | EagerAnd | EagerOr => OperatorClass::Logical,
            Less | Greater | LessEqual | GreaterEqual => OperatorClass::Relational,
            Equal | NotEqual => OperatorClass::Equality,
            Concat | SpacedConcat => OperatorClass::Concatenation,
        }
    }

    /// The kind of value the operator produces.
    #[must_use]
    pub const fn output_kind(self) -> Kind {
        match self.class() {
            OperatorClass::Arithmetic => Kind::Number,
            OperatorClass::Logical | OperatorClass::Relational | OperatorClass::Equality => {
                Kind::Boolean
            },
            OperatorClass::Concatenation => Kind::Text,
        }
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Not => "!",
            Self::Plus => "+",
            Self::Negate => "-",
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Exp => "exp",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Concat, Div, EagerAnd, EagerOr, Equal, Greater, GreaterEqual, Less,
            LessEqual, Log, Mod, Mul, NotEqual, Or, Pow, SpacedConcat, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "^",
            Log => "log",
            And => "&&",
            Or => "||",
            EagerAnd => "&",
            EagerOr => "|",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Concat => "@",
            SpacedConcat => "@@",
        };
        write!(f, "{operator}")
    }
}
