use log::{debug, trace, warn};

use crate::{
    ast::Expr,
    error::Error,
    interpreter::{
        evaluator::core::{Context, Mode},
        lexer::{Token, tokenize},
        memory::Memory,
        parser::core::Parser,
        splitter::split_instructions,
        value::core::Value,
    },
};

/// A compilation session.
///
/// The compiler owns the session memory and the host's print callback. Every
/// call to [`compile`](Self::compile) runs one source line: its instructions
/// are parsed and run in order, and a failing instruction does not stop the
/// ones after it.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use hulk::Kompiler;
///
/// let printed = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&printed);
/// let mut kompiler = Kompiler::new(move |text| sink.borrow_mut().push(text.to_string()));
///
/// kompiler.compile("function square(x) => x * x; print(square(4));");
/// assert_eq!(printed.borrow().as_slice(), ["16"]);
/// ```
pub struct Kompiler {
    memory: Memory,
    output: Box<dyn FnMut(&str)>,
}

impl Kompiler {
    /// Creates an empty session printing through `output`.
    ///
    /// `output` receives both the values printed by `print` and the text of
    /// every diagnostic.
    pub fn new(output: impl FnMut(&str) + 'static) -> Self {
        Self { memory: Memory::new(),
               output: Box::new(output), }
    }

    /// Compiles and runs one source line.
    ///
    /// A line that cannot be tokenized or split is reported once and nothing
    /// in it runs. Otherwise each instruction is parsed; a function
    /// declaration is registered, and any other expression is type checked
    /// and evaluated. Diagnostics of a batch with several instructions name
    /// the instruction's position.
    ///
    /// # Returns
    /// One result per non-empty instruction, in order.
    pub fn compile(&mut self, source: &str) -> Vec<Result<Value, Error>> {
        debug!("compiling {source:?}");

        let instructions = match tokenize(source).and_then(split_instructions) {
            Ok(instructions) => instructions,
            Err(e) => {
                let error = Error::from(e);
                self.report(&error);
                return vec![Err(error)];
            },
        };

        let total = instructions.len();
        let mut results = Vec::with_capacity(total);

        for (i, tokens) in instructions.iter().enumerate() {
            if tokens.is_empty() {
                trace!("skipping empty instruction {}", i + 1);
                continue;
            }

            let result = self.execute(tokens).map_err(|e| {
                                                 if total > 1 {
                                                     e.in_instruction(i + 1, total)
                                                 } else {
                                                     e
                                                 }
                                             });
            if let Err(error) = &result {
                self.report(error);
            }
            results.push(result);
        }

        results
    }

    /// Discards every declared function and starts a fresh session.
    pub fn clear(&mut self) {
        debug!("clearing session");
        self.memory = Memory::new();
    }

    /// The registered functions as `(name, parameters)`, in declaration
    /// order.
    pub fn functions(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.memory.functions()
    }

    /// Runs one instruction.
    ///
    /// Storage allocated by an instruction that fails, or by an expression
    /// once it has run, is released; a registered function keeps its own.
    fn execute(&mut self, tokens: &[Token]) -> Result<Value, Error> {
        let checkpoint = self.memory.checkpoint();

        let parsed = Parser::new(&mut self.memory).parse(tokens);
        let value = match parsed {
            Ok(Expr::FunctionDeclaration { name, function }) => {
                match self.memory.register(function) {
                    Ok(()) => {
                        debug!("registered function '{name}'");
                        return Ok(Value::Void);
                    },
                    Err(e) => Err(e.into()),
                }
            },
            Ok(expr) => self.run(&expr),
            Err(e) => Err(e.into()),
        };

        self.memory.restore(checkpoint);
        value
    }

    fn run(&mut self, expr: &Expr) -> Result<Value, Error> {
        let output = &mut self.output;
        let mut forward = |text: &str| output(text);
        let context = Context::new(&self.memory, &mut forward);

        let kind = context.compute_type(expr)?;
        trace!("instruction has kind {kind}");
        Ok(context.evaluate(expr, Mode::Run)?)
    }

    fn report(&mut self, error: &Error) {
        warn!("{error}");
        (self.output)(&error.to_string());
    }
}
