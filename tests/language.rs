use std::fs;

use slate::{Value, ast::Statement, interpret, parse, tokenize};
use walkdir::WalkDir;

fn eval(src: &str) -> Value {
    interpret(src).unwrap_or_else(|e| panic!("Script failed: {e}\n{src}"))
}

/// Evaluates a multi-statement program and returns the last statement's
/// value.
fn last(src: &str) -> Value {
    match eval(src) {
        Value::List(items) => items.last().cloned().unwrap_or(Value::Null),
        value => value,
    }
}

fn assert_success(src: &str) {
    if let Err(e) = interpret(src) {
        panic!("Script failed: {e}\n{src}");
    }
}

fn assert_failure(src: &str) {
    if interpret(src).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{src}");
    }
}

#[test]
fn bundled_scripts_run_cleanly() {
    let mut count = 0;

    for entry in
        WalkDir::new("scripts").into_iter()
                               .filter_map(Result::ok)
                               .filter(|e| e.path().extension().is_some_and(|ext| ext == "ss"))
    {
        count += 1;
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        if let Err(e) = interpret(&source) {
            panic!("Script {path:?} failed: {e}");
        }
    }

    assert!(count > 0, "No scripts found in scripts/");
}

#[test]
fn precedence_and_associativity() {
    assert_eq!(eval("1 + 2 * 3"), Value::Integer(7));
    assert_eq!(eval("(1 + 2) * 3"), Value::Integer(9));
    assert_eq!(eval("10 - 4 - 3"), Value::Integer(3));
    assert_eq!(eval("2 ^ 3 ^ 2"), Value::Integer(512));
    assert_eq!(eval("-2 ^ 2"), Value::Integer(-4));
}

#[test]
fn statement_sequences_collect_every_value() {
    assert_eq!(eval("1 + 2; 3 * 4; 5 + 6 * 7"),
               Value::from(vec![Value::Integer(3), Value::Integer(12), Value::Integer(47)]));
}

#[test]
fn empty_programs_yield_null() {
    assert_eq!(eval(""), Value::Null);
    assert_eq!(eval("\n;\n"), Value::Null);
    assert_eq!(eval("# only a comment"), Value::Null);
}

#[test]
fn integer_arithmetic_stays_integer() {
    assert_eq!(eval("8 / 2"), Value::Integer(4));
    assert_eq!(eval("7 / 2"), Value::Float(3.5));
    assert_eq!(eval("2 * 3 + 1"), Value::Integer(7));
    assert_eq!(eval("1 + 2.0"), Value::Float(3.0));
}

#[test]
fn division_by_zero_is_error() {
    assert_failure("1 / 0");
    assert_failure("1.0 / 0");
    assert_failure("1 / 0.0");
}

#[test]
fn unary_operators() {
    assert_eq!(eval("-5"), Value::Integer(-5));
    assert_eq!(eval("--5"), Value::Integer(5));
    assert_eq!(eval("+3.5"), Value::Float(3.5));
    assert_eq!(eval("not 0"), Value::Integer(1));
    assert_eq!(eval("not []"), Value::Integer(1));
    assert_eq!(eval("not \"x\""), Value::Integer(0));
    assert_failure("+\"x\"");
    assert_failure("-[1]");
}

#[test]
fn negative_exponents_promote_to_float() {
    assert_eq!(eval("2 ^ -1"), Value::Float(0.5));
}

#[test]
fn integer_overflow_is_error() {
    assert_failure("9223372036854775807 + 1");
    assert_failure("2 ^ 64");
    assert_failure("92233720368547758070");
}

#[test]
fn comparisons_produce_integer_flags() {
    assert_eq!(eval("1 < 2"), Value::Integer(1));
    assert_eq!(eval("2 <= 1"), Value::Integer(0));
    assert_eq!(eval("3 >= 3"), Value::Integer(1));
    assert_eq!(eval("1 == 1.0"), Value::Integer(1));
    assert_eq!(eval("1 != 2"), Value::Integer(1));
    assert_eq!(eval("1 < 2 == 1"), Value::Integer(1));
}

#[test]
fn logic_short_circuits() {
    // `boom` is never defined; evaluating it would fail.
    assert_eq!(eval("0 and boom()"), Value::Integer(0));
    assert_eq!(eval("1 or boom()"), Value::Integer(1));
    assert_failure("1 and boom()");
    assert_failure("0 or boom()");
    assert_eq!(eval("2 and 3"), Value::Integer(1));
    assert_eq!(eval("0 or 0.0"), Value::Integer(0));
}

#[test]
fn strings_concatenate_and_repeat() {
    assert_eq!(eval(r#""foo" + "bar""#), Value::from("foobar"));
    assert_eq!(eval(r#""ab" * 3"#), Value::from("ababab"));
    assert_failure(r#""ab" * -1"#);
    assert_failure(r#"1 + "a""#);
}

#[test]
fn string_escapes_resolve() {
    assert_eq!(eval(r#""a\nb""#), Value::from("a\nb"));
    assert_eq!(eval(r#""a\tb""#), Value::from("a\tb"));
    assert_eq!(eval(r#""say \"hi\"""#), Value::from("say \"hi\""));
    assert_eq!(eval(r#""back\\slash""#), Value::from("back\\slash"));
}

#[test]
fn string_ordering_is_rejected() {
    assert_eq!(eval(r#""line" == "line""#), Value::Integer(1));
    assert_eq!(eval(r#""a" != "b""#), Value::Integer(1));
    assert_failure(r#""a" < "b""#);
    assert_failure(r#"1 == "1""#);
}

#[test]
fn list_operators() {
    assert_eq!(eval("[1, 2, 3] + 4"),
               Value::from(vec![Value::Integer(1),
                                Value::Integer(2),
                                Value::Integer(3),
                                Value::Integer(4)]));
    assert_eq!(eval("[1, 2, 3, 4] - 2"),
               Value::from(vec![Value::Integer(1), Value::Integer(2), Value::Integer(4)]));
    assert_eq!(eval("[1, 2, 3] * [4, 5]"),
               Value::from(vec![Value::Integer(1),
                                Value::Integer(2),
                                Value::Integer(3),
                                Value::Integer(4),
                                Value::Integer(5)]));
    assert_eq!(eval("[10, 20, 30] / 1"), Value::Integer(20));
}

#[test]
fn list_indices_are_checked() {
    assert_failure("[1, 2] / 5");
    assert_failure("[1, 2] / -1");
    assert_failure("[1, 2] - 2");
    assert_failure("[] / 0");
}

#[test]
fn list_equality_is_element_wise() {
    assert_eq!(eval("[1, [2, 3]] == [1, [2, 3]]"), Value::Integer(1));
    assert_eq!(eval("[1] == [1, 2]"), Value::Integer(0));
    assert_eq!(eval("[1] != [2]"), Value::Integer(1));
    assert_eq!(eval("[1, 2.0] == [1.0, 2]"), Value::Integer(1));
}

#[test]
fn variables_bind_and_shadow() {
    assert_eq!(last("var x = 10; x + 1"), Value::Integer(11));
    assert_eq!(last("var x = (var y = 2) + 3; x + y"), Value::Integer(7));
    assert_failure("ghost + 1");
}

#[test]
fn if_chains_select_the_first_truthy_case() {
    assert_eq!(last(r#"var x = 10; if x < 5 then "a" elif x >= 5 and x < 8 then "b" else "c""#),
               Value::from("c"));
    assert_eq!(eval(r#"if 1 then "yes" else "no""#), Value::from("yes"));
    assert_eq!(eval("if 0 then 1"), Value::Null);
    assert_eq!(eval(r#"if "" then 1 else 2"#), Value::Integer(2));
}

#[test]
fn block_bodies_yield_null() {
    assert_eq!(last("var x = if 1 then\n42\nend; not x"), Value::Integer(1));
    assert_eq!(last("var r = 0; if 1 then\nvar r = 5\nend; r"), Value::Integer(5));
}

#[test]
fn for_collects_expression_form_results() {
    assert_eq!(eval("for i = 1 to 5 do i * i"),
               Value::from(vec![Value::Integer(1),
                               Value::Integer(4),
                               Value::Integer(9),
                               Value::Integer(16)]));
}

#[test]
fn for_steps_in_both_directions() {
    assert_eq!(eval("for i = 5 to 1 step -1 do i"),
               Value::from(vec![Value::Integer(5),
                               Value::Integer(4),
                               Value::Integer(3),
                               Value::Integer(2)]));
    assert_eq!(eval("for x = 0.0 to 1.0 step 0.5 do x"),
               Value::from(vec![Value::Float(0.0), Value::Float(0.5)]));
    assert_failure("for i = 1 to 3 step 0 do i");
    assert_failure(r#"for i = "a" to 3 do i"#);
}

#[test]
fn for_block_form_runs_for_effect() {
    assert_eq!(last("var sum = 0; for i = 1 to 4 do\nvar sum = sum + i\nend; sum"),
               Value::Integer(6));
}

#[test]
fn while_collects_expression_form_results() {
    assert_eq!(last("var x = 0; while x < 5 do var x = x + 1"),
               Value::from(vec![Value::Integer(1),
                               Value::Integer(2),
                               Value::Integer(3),
                               Value::Integer(4),
                               Value::Integer(5)]));
}

#[test]
fn break_ends_a_loop_with_collected_values() {
    assert_eq!(eval("for i = 0 to 10 do if i == 3 then break else i"),
               Value::from(vec![Value::Integer(0), Value::Integer(1), Value::Integer(2)]));
}

#[test]
fn continue_skips_collection() {
    assert_eq!(eval("for i = 0 to 5 do if i == 2 then continue else i"),
               Value::from(vec![Value::Integer(0),
                               Value::Integer(1),
                               Value::Integer(3),
                               Value::Integer(4)]));
}

#[test]
fn control_flow_outside_its_construct_is_error() {
    assert_failure("return 1");
    assert_failure("break");
    assert_failure("continue");
    assert_failure("func f()\nbreak\nend\nf()");
    assert_failure("func f()\ncontinue\nend\nf()");
}

#[test]
fn named_functions_recurse() {
    assert_eq!(last("func fact(n) -> if n <= 1 then 1 else n * fact(n - 1); fact(5)"),
               Value::Integer(120));
}

#[test]
fn anonymous_functions_are_values() {
    assert_eq!(last(r#"var add = func (a, b) -> a + b; add("foo", "bar")"#),
               Value::from("foobar"));
    assert_eq!(eval("func foo() -> 1").to_string(), "<function foo>");
    assert_eq!(eval("func () -> 1").to_string(), "<function anonymous>");
}

#[test]
fn block_functions_return_explicitly() {
    let src = "func sign(x)\n\
               if x < 0 then return -1\n\
               if x > 0 then return 1\n\
               return 0\n\
               end\n\
               sign(-5); sign(7); sign(0)";
    let Value::List(values) = eval(src) else {
        panic!("expected a list of statement values");
    };
    assert_eq!(values[1..].to_vec(),
               vec![Value::Integer(-1), Value::Integer(1), Value::Integer(0)]);
}

#[test]
fn block_functions_without_return_yield_null() {
    assert_eq!(last("func f()\n1 + 1\nend\nf()"), Value::Null);
}

#[test]
fn closures_capture_their_defining_scope() {
    let src = "func adder(n)\n\
               func add(m) -> m + n\n\
               return add\n\
               end\n\
               var add2 = adder(2)\n\
               add2(40)";
    assert_eq!(last(src), Value::Integer(42));
}

#[test]
fn free_variables_resolve_through_the_closure_not_the_call_site() {
    let src = "var n = 1\n\
               func get() -> n\n\
               func shadow()\n\
               var n = 99\n\
               return get()\n\
               end\n\
               shadow()";
    assert_eq!(last(src), Value::Integer(1));
}

#[test]
fn arity_is_checked_exactly() {
    assert_failure("func add(a, b) -> a + b; add(1)");
    assert_failure("func add(a, b) -> a + b; add(1, 2, 3)");
    assert_failure("len(1, 2)");
}

#[test]
fn only_functions_are_callable() {
    assert_failure("var x = 4; x(2)");
    assert_failure(r#""text"(1)"#);
}

#[test]
fn native_functions_work() {
    assert_eq!(eval(r#"len("abc")"#), Value::Integer(3));
    assert_eq!(eval("len([1, 2])"), Value::Integer(2));
    assert_eq!(last("var xs = append([1], 2); xs == [1, 2]"), Value::Integer(1));
    assert_eq!(eval(r#"print("hi")"#), Value::Null);
    assert_failure("len(1)");
}

#[test]
fn run_executes_a_script_file() {
    assert_success(r#"run("scripts/sum.ss")"#);
    assert_failure(r#"run("scripts/no_such_file.ss")"#);
    assert_failure("run(1)");
}

#[test]
fn lex_errors_are_reported() {
    assert_failure("!");
    assert_failure("\"abc");
    assert_failure("1.2.3");
    assert_failure("@");
    assert_failure("var x = 3 $");
}

#[test]
fn syntax_errors_are_reported() {
    assert_failure("1 +");
    assert_failure("(1 + 2");
    assert_failure("1 + 2 3");
    assert_failure("if 1 then\n2\n");
    assert_failure("f(1)(2)");
    assert_failure("var = 3");
}

#[test]
fn diagnostics_name_the_offending_line() {
    let error = interpret("var x = 10\n1 +").unwrap_err();
    assert!(error.to_string().contains("line 2"), "{error}");

    let report = error.report("demo.ss", "var x = 10\n1 +");
    assert!(report.contains("SyntaxError"), "{report}");
    assert!(report.contains('^'), "{report}");
}

#[test]
fn token_spans_track_lines_and_columns() {
    let tokens = tokenize("var x = 1\nx + 2").unwrap();

    // `x` on line 1 occupies column 5.
    let (_, span) = &tokens[1];
    assert_eq!(span.start.line, 1);
    assert_eq!(span.start.column, 5);
    assert_eq!(span.end.column, 6);

    // `2` sits on line 2.
    let (_, span) = &tokens[tokens.len() - 2];
    assert_eq!(span.start.line, 2);
}

#[test]
fn node_spans_enclose_their_children() {
    let tokens = tokenize("10 + 20 * 30").unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::Expression { expr } = &program[0] else {
        panic!("expected an expression statement");
    };
    assert_eq!(expr.span().start.offset, 0);
    assert_eq!(expr.span().end.offset, 12);
}

#[test]
fn floats_always_print_a_decimal_point() {
    assert_eq!(eval("1.5 * 2").repr(), "3.0");
    assert_eq!(eval("2.25 + 0.25").repr(), "2.5");
    assert_eq!(eval(r#"[1, "a"]"#).repr(), r#"[1, "a"]"#);
}
