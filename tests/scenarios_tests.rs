// tests/scenarios_tests.rs
//! End-to-end coverage for the concrete source -> `return` scenarios.
use simplec::error::CompileError;
use simplec::ir::{Generator, to_string};
use simplec::parser::parse;
use simplec::types::Type;

fn compile(source: &str, arg_ty: Type) -> Result<String, CompileError> {
    let program = parse(source)?;
    let mut generator = Generator::new(arg_ty)?;
    let ret = generator.generate(&program)?;
    Ok(to_string(&generator.graph, ret))
}

fn run(source: &str) -> String {
    compile(source, Type::int_bottom()).unwrap_or_else(|e| panic!("{source:?} failed to compile: {e}"))
}

#[test]
fn literal_return() {
    assert_eq!(run("return 1;"), "return 1;");
}

#[test]
fn mixed_arithmetic_folds_to_a_single_constant() {
    assert_eq!(run("return 1+2*3+-5;"), "return 2;");
}

#[test]
fn two_declarations_fold_through_addition() {
    assert_eq!(run("int a=1; int b=2; return a+b;"), "return 3;");
}

#[test]
fn inner_block_shadowing_does_not_leak_out() {
    assert_eq!(run("int a=1; int b=2; int c=0; { int b=3; c=a+b; } return c;"), "return 4;");
}

#[test]
fn non_constant_self_addition_becomes_a_multiply() {
    assert_eq!(run("return arg+arg;"), "return (arg*2);");
}

#[test]
fn a_constant_argument_type_folds_the_argument_itself() {
    let out = compile("return arg;", Type::int(2)).unwrap();
    assert_eq!(out, "return 2;");
}

#[test]
fn division_by_constant_zero_is_a_compute_error_with_a_span() {
    let err = compile("return 0/0;", Type::int_bottom()).unwrap_err();
    assert!(matches!(err, CompileError::Compute { .. }));
    assert_eq!(err.message(), "divide by zero");
}

#[test]
fn referencing_an_identifier_in_its_own_declaration_fails() {
    let err = compile("int a=a; return a;", Type::int_bottom()).unwrap_err();
    assert!(matches!(err, CompileError::Compute { .. }));
    assert_eq!(err.message(), "unknown identifier 'a'");
}

#[test]
fn commutative_addition_of_leaf_values_canonicalises_to_the_same_text() {
    let mut a = Generator::new(Type::int_bottom()).unwrap();
    let prog_a = parse("return arg+1;").unwrap();
    let ret_a = a.generate(&prog_a).unwrap();

    let mut b = Generator::new(Type::int_bottom()).unwrap();
    let prog_b = parse("return 1+arg;").unwrap();
    let ret_b = b.generate(&prog_b).unwrap();

    assert_eq!(to_string(&a.graph, ret_a), to_string(&b.graph, ret_b));
}

#[test]
fn multiplying_by_zero_absorbs_any_subexpression() {
    assert_eq!(run("return (arg+1)*0;"), "return 0;");
}

#[test]
fn triple_negation_of_not_collapses_to_a_single_not() {
    assert_eq!(run("return !!!(arg==1);"), "return (!(arg==1));");
}

#[test]
fn if_else_assigning_different_constants_produces_a_phi() {
    let out = run("int a=1; if (arg) { a=2; } else { a=3; } return a;");
    assert!(out.starts_with("return Phi("));
    assert!(out.contains('2') && out.contains('3'));
}

#[test]
fn if_else_assigning_the_same_constant_needs_no_phi() {
    let out = run("int a=1; if (arg) { a=5; } else { a=5; } return a;");
    assert_eq!(out, "return 5;");
}

#[test]
fn greater_than_is_synthesized_from_less_than_by_operand_swap() {
    let gt = run("return arg>1;");
    let lt_swapped = run("return 1<arg;");
    assert_eq!(gt, lt_swapped);
}

#[test]
fn not_equal_is_synthesized_as_negated_equality() {
    assert_eq!(run("return arg!=1;"), "return (!(arg==1));");
}
