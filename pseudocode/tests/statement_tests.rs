//! Statement semantics: declarations, assignment, conditionals, switch,
//! loops, and I/O

mod common;

use common::{run_err, run_no_newlines, run_ok, run_with_input};
use pretty_assertions::assert_eq;
use pseudocode::{ProgramError, RuntimeError};

#[test]
fn test_declare_assign_output() {
    let out = run_ok("DECLARE x : INTEGER\nx <- 3\nOUTPUT x + 4");
    assert_eq!(out, "7\n");
}

#[test]
fn test_declaration_defaults() {
    assert_eq!(run_ok("DECLARE n : INTEGER\nOUTPUT n"), "0\n");
    assert_eq!(run_ok("DECLARE x : REAL\nOUTPUT x"), "0.0\n");
    assert_eq!(run_ok("DECLARE s : STRING\nOUTPUT LENGTH(s)"), "0\n");
    assert_eq!(run_ok("DECLARE b : BOOLEAN\nOUTPUT b"), "FALSE\n");
}

#[test]
fn test_assignment_type_is_enforced() {
    let err = run_err("DECLARE x : INTEGER\nx <- \"three\"");
    let ProgramError::Runtime(fault) = err else {
        panic!("expected runtime error, got {:?}", err);
    };
    assert_eq!(
        fault.error,
        RuntimeError::TypeMismatch {
            expected: "INTEGER".into(),
            got: "STRING".into()
        }
    );
}

#[test]
fn test_assignment_to_undeclared() {
    let err = run_err("ghost <- 1");
    let ProgramError::Runtime(fault) = err else {
        panic!("expected runtime error");
    };
    assert_eq!(fault.error, RuntimeError::VariableUndeclared("ghost".into()));
}

#[test]
fn test_integer_stays_integer_after_assignment() {
    // Widening applies to operators, never to assignment
    let err = run_err("DECLARE x : INTEGER\nx <- 1.5");
    let ProgramError::Runtime(fault) = err else {
        panic!("expected runtime error");
    };
    assert!(matches!(fault.error, RuntimeError::TypeMismatch { .. }));
}

#[test]
fn test_constant_immutability() {
    let err = run_err("CONSTANT PI = 3.14\nPI <- 1");
    let ProgramError::Runtime(fault) = err else {
        panic!("expected runtime error");
    };
    assert_eq!(fault.error, RuntimeError::ConstantAssignment("PI".into()));
    assert_eq!(fault.line(), 2);
}

#[test]
fn test_constant_type_inferred_from_initializer() {
    assert_eq!(run_ok("CONSTANT GREETING = \"hi\"\nOUTPUT GREETING"), "hi\n");
}

#[test]
fn test_if_branches_in_order() {
    let src = "\
DECLARE x : INTEGER
x <- 5
IF x > 10 THEN
OUTPUT \"big\"
ELSE IF x > 3 THEN
OUTPUT \"medium\"
ELSE
OUTPUT \"small\"
ENDIF";
    assert_eq!(run_ok(src), "medium\n");
}

#[test]
fn test_if_at_most_one_branch_runs() {
    let src = "\
DECLARE x : INTEGER
x <- 20
IF x > 10 THEN
OUTPUT \"first\"
ELSE IF x > 5 THEN
OUTPUT \"second\"
ENDIF";
    assert_eq!(run_ok(src), "first\n");
}

#[test]
fn test_if_condition_must_be_boolean() {
    let err = run_err("IF 1 THEN\nOUTPUT 1\nENDIF");
    let ProgramError::Runtime(fault) = err else {
        panic!("expected runtime error");
    };
    assert_eq!(
        fault.error,
        RuntimeError::TypeMismatch {
            expected: "BOOLEAN".into(),
            got: "INTEGER".into()
        }
    );
}

#[test]
fn test_scope_isolation_in_blocks() {
    // Names declared inside a block are gone after it exits
    let src = "\
IF TRUE THEN
DECLARE t : INTEGER
t <- 9
ENDIF
OUTPUT t";
    let err = run_err(src);
    let ProgramError::Runtime(fault) = err else {
        panic!("expected runtime error");
    };
    assert_eq!(fault.error, RuntimeError::VariableUndefined("t".into()));
    assert_eq!(fault.line(), 5);
}

#[test]
fn test_case_matches_in_order() {
    let src = "\
DECLARE x : INTEGER
x <- 2
CASE OF x
1 : OUTPUT \"one\"
2 : OUTPUT \"two\"
OTHERWISE OUTPUT \"many\"
ENDCASE";
    assert_eq!(run_ok(src), "two\n");
}

#[test]
fn test_case_otherwise() {
    let src = "\
DECLARE x : INTEGER
x <- 7
CASE OF x
1 : OUTPUT \"one\"
OTHERWISE OUTPUT \"many\"
ENDCASE";
    assert_eq!(run_ok(src), "many\n");
}

#[test]
fn test_case_no_match_no_otherwise() {
    let src = "\
DECLARE x : INTEGER
x <- 9
CASE OF x
1 : OUTPUT \"one\"
ENDCASE
OUTPUT \"after\"";
    assert_eq!(run_ok(src), "after\n");
}

#[test]
fn test_case_label_of_other_type_does_not_match() {
    let src = "\
DECLARE s : STRING
s <- \"1\"
CASE OF s
1 : OUTPUT \"int one\"
\"1\" : OUTPUT \"string one\"
ENDCASE";
    assert_eq!(run_ok(src), "string one\n");
}

#[test]
fn test_while_loop() {
    let src = "\
DECLARE n : INTEGER
n <- 0
WHILE n < 3 DO
n <- n + 1
OUTPUT n
ENDWHILE";
    assert_eq!(run_ok(src), "1\n2\n3\n");
}

#[test]
fn test_while_condition_false_skips_body() {
    let src = "\
WHILE FALSE DO
OUTPUT \"never\"
ENDWHILE
OUTPUT \"done\"";
    assert_eq!(run_ok(src), "done\n");
}

#[test]
fn test_repeat_runs_body_at_least_once() {
    let src = "\
DECLARE n : INTEGER
n <- 10
REPEAT
OUTPUT n
n <- n + 1
UNTIL n > 10";
    assert_eq!(run_ok(src), "10\n");
}

#[test]
fn test_for_loop() {
    let out = run_ok("FOR i <- 1 TO 3\nOUTPUT i\nNEXT i");
    assert_eq!(out, "1\n2\n3\n");
}

#[test]
fn test_for_loop_step() {
    assert_eq!(run_ok("FOR i <- 1 TO 7 STEP 3\nOUTPUT i\nNEXT"), "1\n4\n7\n");
    assert_eq!(run_ok("FOR i <- 3 TO 1 STEP -1\nOUTPUT i\nNEXT"), "3\n2\n1\n");
}

#[test]
fn test_for_loop_empty_range() {
    assert_eq!(run_ok("FOR i <- 3 TO 1\nOUTPUT i\nNEXT\nOUTPUT \"done\""), "done\n");
}

#[test]
fn test_for_step_zero() {
    let err = run_err("FOR i <- 1 TO 3 STEP 0\nOUTPUT i\nNEXT");
    let ProgramError::Runtime(fault) = err else {
        panic!("expected runtime error");
    };
    assert_eq!(fault.error, RuntimeError::StepZero);
}

#[test]
fn test_for_iterator_is_not_assignable() {
    let err = run_err("FOR i <- 1 TO 3\ni <- 10\nNEXT");
    let ProgramError::Runtime(fault) = err else {
        panic!("expected runtime error");
    };
    assert_eq!(fault.error, RuntimeError::ConstantAssignment("i".into()));
}

#[test]
fn test_for_iterator_out_of_scope_after_loop() {
    let err = run_err("FOR i <- 1 TO 3\nNEXT\nOUTPUT i");
    let ProgramError::Runtime(fault) = err else {
        panic!("expected runtime error");
    };
    assert_eq!(fault.error, RuntimeError::VariableUndefined("i".into()));
}

#[test]
fn test_output_joins_with_spaces() {
    assert_eq!(run_ok("OUTPUT 1, \"and\", 2.5"), "1 and 2.5\n");
}

#[test]
fn test_output_no_newlines_flag() {
    assert_eq!(run_no_newlines("OUTPUT \"a\"\nOUTPUT \"b\""), "ab");
}

#[test]
fn test_input_binds_string() {
    assert_eq!(run_with_input("INPUT s\nOUTPUT s", &["hello"]), "hello\n");
}

#[test]
fn test_input_always_defines_string() {
    // Even a declared INTEGER is shadowed by a fresh STRING binding
    let src = "DECLARE n : INTEGER\nINPUT n\nOUTPUT n + \"!\"";
    assert_eq!(run_with_input(src, &["5"]), "5!\n");
}

#[test]
fn test_input_at_end_of_stream() {
    let err = run_err("INPUT s");
    let ProgramError::Runtime(fault) = err else {
        panic!("expected runtime error");
    };
    assert!(matches!(fault.error, RuntimeError::IoError(_)));
}

#[test]
fn test_output_round_trip() {
    // OUTPUT x then INPUT y yields the same textual form
    let printed = run_ok("OUTPUT 3.5");
    let echoed = run_with_input("INPUT y\nOUTPUT y", &[printed.trim_end()]);
    assert_eq!(printed, echoed);
}

#[test]
fn test_comments_are_ignored() {
    let src = "// leading comment\nOUTPUT 1 // trailing comment\n// done";
    assert_eq!(run_ok(src), "1\n");
}
