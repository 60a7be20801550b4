use std::fs::{self};

use hulk::{error::Category, get_result};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_dsl_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = get_result(&code) {
                panic!("DSL example {} in {:?} failed:\n{}\nError: {}", i + 1, path, code, e);
            }
        }
    }

    assert!(count > 0, "No DSL examples found in book/src");
}

fn extract_dsl_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```hulk") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_prints(src: &str, expected: &[&str]) {
    match get_result(src) {
        Ok(printed) => assert_eq!(printed, expected, "unexpected output for {src:?}"),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str, category: Category) {
    match get_result(src) {
        Ok(_) => panic!("Script succeeded but was expected to fail"),
        Err(e) => assert_eq!(e.category(), category, "unexpected diagnostic: {e}"),
    }
}

#[test]
fn arithmetic_and_precedence() {
    assert_prints("print(2 + 3 * 4);", &["14"]);
    assert_prints("print(2 ^ 10);", &["1024"]);
    assert_prints("print((2 + 3) * 4);", &["20"]);
    assert_prints("print(10 - 4 - 3);", &["3"]);
    assert_prints("print(2 ^ 3 ^ 2);", &["512"]);
    assert_prints("print(7 % 4);", &["3"]);
    assert_prints("print(1 / 4);", &["0.25"]);
}

#[test]
fn unary_operators() {
    assert_prints("print(-3 + 5);", &["2"]);
    assert_prints("print(2 * -3);", &["-6"]);
    assert_prints("print(2 - -3);", &["5"]);
    assert_prints("print(+4);", &["4"]);
    assert_prints("print(!false);", &["true"]);
}

#[test]
fn builtin_functions_and_constants() {
    assert_prints("print(sqrt(16));", &["4"]);
    assert_prints("print(sin(0));", &["0"]);
    assert_prints("print(cos(0));", &["1"]);
    assert_prints("print(exp(0));", &["1"]);
    assert_prints("print(log(2, 8));", &["3"]);
    assert_prints("print(PI == π);", &["true"]);
    assert_prints("print(e == E);", &["true"]);
    assert_prints("print(log(e, e));", &["1"]);
    assert_prints("print(Infinity > 1000000);", &["true"]);
}

#[test]
fn logical_and_comparisons() {
    assert_prints("print(2 < 3);", &["true"]);
    assert_prints("print(3 <= 2);", &["false"]);
    assert_prints("print(2 == 2 && 3 != 4);", &["true"]);
    assert_prints("print(false || true);", &["true"]);
    assert_prints("print(true & false);", &["false"]);
    assert_prints("print(false | true);", &["true"]);
    assert_prints("print(\"a\" == \"a\");", &["true"]);
}

#[test]
fn short_circuit_skips_the_right_operand() {
    assert_prints("print(false && 1 / 0 == 1);", &["false"]);
    assert_prints("print(true || 1 / 0 == 1);", &["true"]);
    assert_failure("print(false & 1 / 0 == 1);", Category::Arithmetic);
}

#[test]
fn string_concatenation() {
    assert_prints("print(\"n = \" @ 2 + 3);", &["n = 5"]);
    assert_prints("print(\"hello\" @@ \"world\");", &["hello world"]);
    assert_prints("print(\"ok: \" @ true);", &["ok: true"]);
}

#[test]
fn let_bindings() {
    assert_prints("print(let number x = 5 in x + 1);", &["6"]);
    assert_prints("print(let x = 1 in let x = 2 in x);", &["2"]);
    assert_prints("print(let a = 2, b = a * 3 in a + b);", &["8"]);
    assert_prints("print(let s = \"hi\" in s @@ s);", &["hi hi"]);
}

#[test]
fn destructive_assignment() {
    assert_prints("print(let x = 1 in (x := x + 1) * 10);", &["20"]);
    assert_prints("print(let a = 0, b = 0 in let c = (a, b := 7) in a + b);", &["14"]);
    assert_failure("print(let number x = 1 in x := \"one\");", Category::Semantic);
}

#[test]
fn conditionals() {
    assert_prints("print(if (2 < 3) \"yes\" else \"no\");", &["yes"]);
    assert_prints("print(if (false) 1 else if (true) 2 else 3);", &["2"]);
    assert_prints("print(if (true) if (false) 1 else 2 else 3);", &["2"]);
    assert_prints("if (true) print(\"a\") else print(\"b\");", &["a"]);
}

#[test]
fn user_defined_functions() {
    assert_prints("function square(x) => x * x;\nprint(square(3));", &["9"]);
    assert_prints("function add(a, b) => a + b;\nprint(add(2, 5));", &["7"]);
    assert_prints("function fact(n) => if (n <= 1) 1 else n * fact(n - 1);\nprint(fact(5));",
                  &["120"]);
    assert_prints("function fib(n) => if (n < 2) n else fib(n - 1) + fib(n - 2);\nprint(fib(10));",
                  &["55"]);
}

#[test]
fn local_bindings_survive_recursive_calls() {
    assert_prints("function sum(n) => if (n == 0) 0 else let here = n in sum(n - 1) + here;\n\
                   print(sum(4));",
                  &["10"]);
}

#[test]
fn print_returns_its_argument() {
    assert_prints("print(print(2) + 1);", &["2", "3"]);
}

#[test]
fn instructions_share_a_line() {
    assert_prints("print(1); print(2);;print(3)", &["1", "2", "3"]);
}

#[test]
fn example_script_works() {
    let contents = fs::read_to_string("tests/example.hulk").unwrap();
    assert_success(&contents);
}

#[test]
fn division_by_zero_is_error() {
    assert_failure("1 / 0;", Category::Arithmetic);
    assert_failure("5 % 0;", Category::Arithmetic);
}

#[test]
fn unknown_names_are_errors() {
    assert_failure("foo + 1;", Category::Reference);
    assert_failure("bar(1);", Category::Reference);
}

#[test]
fn kind_mismatches_are_errors() {
    assert_failure("1 + true;", Category::Semantic);
    assert_failure("!3;", Category::Semantic);
    assert_failure("1 == \"1\";", Category::Semantic);
    assert_failure("if (1) 2 else 3;", Category::Semantic);
}

#[test]
fn malformed_input_is_an_error() {
    assert_failure("2 +;", Category::Syntax);
    assert_failure("(1 + 2;", Category::Syntax);
    assert_failure("1 + 2);", Category::Syntax);
    assert_failure("max(1,, 2);", Category::Syntax);
    assert_failure("if (true) 1;", Category::Syntax);
    assert_failure("let x = 1;", Category::Syntax);
    assert_failure("number x = 1;", Category::Syntax);
    assert_failure("1 2;", Category::Syntax);
    assert_failure("print(\"open);", Category::Lexical);
    assert_failure("2x + 1;", Category::Lexical);
}

#[test]
fn reserved_names_cannot_be_declared() {
    assert_failure("function sqrt(x) => x;", Category::Lexical);
    assert_failure("function f(PI) => PI;", Category::Lexical);
    assert_failure("function f(e) => e;", Category::Lexical);
    assert_failure("let print = 1 in print;", Category::Lexical);
}

#[test]
fn wrong_function_arity_is_error() {
    assert_failure("function f(x, y) => x + y;\nf(3);", Category::Semantic);
    assert_failure("sqrt(1, 2);", Category::Semantic);
}

#[test]
fn redefinition_of_function_is_error() {
    assert_failure("function f(x) => x;\nfunction f(y) => y;", Category::Reference);
    assert_failure("function f(x, x) => x;", Category::Reference);
}

#[test]
fn unbounded_recursion_is_an_overflow() {
    assert_failure("function f(n) => f(n);", Category::Overflow);
    assert_failure("function h(n) => if (n > 0) h(n - 1) else h(n + 1);", Category::Overflow);
    assert_failure("function g(n) => if (n == 0) 0 else g(n + 1);\ng(1);", Category::Overflow);
}
