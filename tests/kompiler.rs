use std::{cell::RefCell, rc::Rc};

use hulk::{
    Kompiler,
    error::{Category, Error},
    interpreter::value::core::Value,
};

fn session() -> (Kompiler, Rc<RefCell<Vec<String>>>) {
    let printed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&printed);
    let kompiler = Kompiler::new(move |text| sink.borrow_mut().push(text.to_string()));
    (kompiler, printed)
}

fn single(kompiler: &mut Kompiler, source: &str) -> Result<Value, Error> {
    let mut results = kompiler.compile(source);
    assert_eq!(results.len(), 1, "expected one instruction in {source:?}");
    results.remove(0)
}

#[test]
fn arithmetic_follows_precedence() {
    let (mut kompiler, _) = session();
    assert_eq!(single(&mut kompiler, "2 + 3 * 4"), Ok(Value::Number(14.0)));
    assert_eq!(single(&mut kompiler, "2 ^ 10"), Ok(Value::Number(1024.0)));
}

#[test]
fn zero_divisors_are_arithmetic_errors() {
    let (mut kompiler, printed) = session();
    for source in ["1 / 0", "1 % 0", "let x = 0 in 3 / x"] {
        let error = single(&mut kompiler, source).unwrap_err();
        assert_eq!(error.category(), Category::Arithmetic);
    }
    assert_eq!(printed.borrow().len(), 3);
}

#[test]
fn let_shadowing_resolves_to_the_innermost_binding() {
    let (mut kompiler, _) = session();
    assert_eq!(single(&mut kompiler, "let number x = 5 in x + 1"), Ok(Value::Number(6.0)));
    assert_eq!(single(&mut kompiler, "let x = 1 in let x = \"inner\" in x"),
               Ok(Value::from("inner")));
}

#[test]
fn self_recursive_function() {
    let (mut kompiler, _) = session();
    let declaration = "function fact(n) => if (n <= 1) 1 else n * fact(n - 1)";
    assert_eq!(single(&mut kompiler, declaration), Ok(Value::Void));
    assert_eq!(single(&mut kompiler, "fact(5)"), Ok(Value::Number(120.0)));
}

#[test]
fn unconditional_recursion_overflows_at_declaration() {
    let (mut kompiler, printed) = session();
    let error = single(&mut kompiler, "function loop(n) => loop(n)").unwrap_err();

    assert_eq!(error.category(), Category::Overflow);
    assert_eq!(printed.borrow().as_slice(),
               ["Overflow error: function 'loop' may exceed the call-stack limit of 128."]);
    assert_eq!(kompiler.functions().count(), 0);
}

#[test]
fn recursion_in_every_branch_overflows_at_declaration() {
    let (mut kompiler, printed) = session();
    let declaration = "function f(n) => if (n > 0) f(n - 1) else f(n + 1)";
    let error = single(&mut kompiler, declaration).unwrap_err();

    assert_eq!(error.category(), Category::Overflow);
    assert_eq!(printed.borrow().as_slice(),
               ["Overflow error: function 'f' may exceed the call-stack limit of 128."]);
    assert_eq!(kompiler.functions().count(), 0);

    // The same name can be declared again once the overflow is reported.
    assert_eq!(single(&mut kompiler, "function f(n) => if (n > 0) f(n - 1) else 0"),
               Ok(Value::Void));
    assert_eq!(single(&mut kompiler, "f(3)"), Ok(Value::Number(0.0)));
}

#[test]
fn runaway_recursion_overflows_at_runtime() {
    let (mut kompiler, _) = session();
    single(&mut kompiler, "function g(n) => if (n == 0) 0 else g(n + 1)").unwrap();

    let error = single(&mut kompiler, "g(1)").unwrap_err();
    assert_eq!(error.category(), Category::Overflow);

    // The depth counter is back to zero.
    assert_eq!(single(&mut kompiler, "g(0)"), Ok(Value::Number(0.0)));
}

#[test]
fn untaken_branch_has_no_side_effects() {
    let (mut kompiler, printed) = session();
    let result = single(&mut kompiler, "if (true) \"a\" else print(\"b\")");

    assert_eq!(result, Ok(Value::from("a")));
    assert!(printed.borrow().is_empty());
}

#[test]
fn duplicate_functions_are_rejected_until_cleared() {
    let (mut kompiler, _) = session();
    single(&mut kompiler, "function f(x) => x + 1").unwrap();

    let error = single(&mut kompiler, "function f(y) => y").unwrap_err();
    assert_eq!(error.category(), Category::Reference);
    assert_eq!(single(&mut kompiler, "f(1)"), Ok(Value::Number(2.0)));

    kompiler.clear();
    assert_eq!(kompiler.functions().count(), 0);
    single(&mut kompiler, "function f(y) => y").unwrap();
    assert_eq!(single(&mut kompiler, "f(1)"), Ok(Value::Number(1.0)));
}

#[test]
fn a_failing_instruction_does_not_stop_the_batch() {
    let (mut kompiler, printed) = session();
    let results = kompiler.compile("1/0; 2+2;");

    assert_eq!(results.len(), 2);
    assert_eq!(results[1], Ok(Value::Number(4.0)));

    let error = results[0].as_ref().unwrap_err();
    assert_eq!(error.category(), Category::Arithmetic);
    assert!(matches!(error, Error::Instruction { position: 1,
                                                  total: 2,
                                                  .. }));
    assert_eq!(printed.borrow().as_slice(),
               ["Instruction 1 of 2: Arithmetic error: division by zero in operator '/'."]);
}

#[test]
fn splitting_failures_abort_the_batch() {
    let (mut kompiler, printed) = session();
    let results = kompiler.compile("print(1); print((2; print(3);");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_ref().unwrap_err().category(), Category::Syntax);
    assert_eq!(printed.borrow().len(), 1);
}

#[test]
fn sessions_start_fresh_after_clear() {
    let (mut kompiler, printed) = session();
    let program = "function twice(x) => x * 2; print(twice(21));";

    kompiler.compile(program);
    kompiler.clear();
    kompiler.compile(program);

    assert_eq!(printed.borrow().as_slice(), ["42", "42"]);
}

#[test]
fn function_table_lists_parameters_in_order() {
    let (mut kompiler, _) = session();
    kompiler.compile("function add(a, b) => a + b; function zero() => 0;");

    let functions = kompiler.functions()
                            .map(|(name, parameters)| (name.to_string(), parameters.to_vec()))
                            .collect::<Vec<_>>();
    assert_eq!(functions,
               vec![("add".to_string(), vec!["a".to_string(), "b".to_string()]),
                    ("zero".to_string(), vec![])]);
}

#[test]
fn arguments_are_evaluated_without_side_effects() {
    let (mut kompiler, printed) = session();
    kompiler.compile("function id(x) => x; print(id(print(7)));");

    assert_eq!(printed.borrow().as_slice(), ["7"]);
}

#[test]
fn failed_instructions_leave_the_session_usable() {
    let (mut kompiler, _) = session();
    assert!(single(&mut kompiler, "let x = 1 in x + true").is_err());
    assert!(single(&mut kompiler, "function broken(a) => a +").is_err());
    assert_eq!(kompiler.functions().count(), 0);
    assert_eq!(single(&mut kompiler, "let x = 2 in x * x"), Ok(Value::Number(4.0)));
}
