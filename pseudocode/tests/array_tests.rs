//! Array semantics: declaration, bounds, index assignment, 2-D arrays,
//! and pass-by-value copies

mod common;

use common::{run_err, run_ok};
use pretty_assertions::assert_eq;
use pseudocode::{ProgramError, RuntimeError};

fn runtime_error(src: &str) -> RuntimeError {
    match run_err(src) {
        ProgramError::Runtime(fault) => fault.error,
        other => panic!("expected runtime error, got {:?}", other),
    }
}

#[test]
fn test_declare_write_read() {
    let src = "DECLARE a : ARRAY[1:3] OF INTEGER\na[2] <- 5\nOUTPUT a[2]";
    assert_eq!(run_ok(src), "5\n");
}

#[test]
fn test_elements_start_at_defaults() {
    let src = "DECLARE a : ARRAY[1:3] OF INTEGER\nOUTPUT a[1], a[3]";
    assert_eq!(run_ok(src), "0 0\n");
}

#[test]
fn test_whole_array_output() {
    let src = "DECLARE a : ARRAY[1:3] OF INTEGER\na[1] <- 7\nOUTPUT a";
    assert_eq!(run_ok(src), "[7, 0, 0]\n");
}

#[test]
fn test_bounds_must_start_at_one() {
    assert_eq!(
        runtime_error("DECLARE a : ARRAY[0:3] OF INTEGER"),
        RuntimeError::ArrayNotOneIndexed { lower: 0 }
    );
    assert_eq!(
        runtime_error("DECLARE a : ARRAY[2:5] OF INTEGER"),
        RuntimeError::ArrayNotOneIndexed { lower: 2 }
    );
}

#[test]
fn test_upper_bound_below_lower() {
    assert_eq!(
        runtime_error("DECLARE a : ARRAY[1:0] OF INTEGER"),
        RuntimeError::ArrayBoundsInvalid { lower: 1, upper: 0 }
    );
}

#[test]
fn test_single_element_array() {
    let src = "DECLARE a : ARRAY[1:1] OF INTEGER\na[1] <- 9\nOUTPUT a[1]";
    assert_eq!(run_ok(src), "9\n");
}

#[test]
fn test_index_out_of_bounds_before_mutation() {
    let src = "DECLARE a : ARRAY[1:3] OF INTEGER\na[4] <- 1";
    assert_eq!(
        runtime_error(src),
        RuntimeError::IndexOutOfBounds { index: 4, length: 3 }
    );
}

#[test]
fn test_index_assignment_type_check() {
    let src = "DECLARE a : ARRAY[1:3] OF INTEGER\na[1] <- \"s\"";
    assert_eq!(
        runtime_error(src),
        RuntimeError::TypeMismatch {
            expected: "INTEGER".into(),
            got: "STRING".into()
        }
    );
}

#[test]
fn test_no_widening_in_index_assignment() {
    let src = "DECLARE a : ARRAY[1:3] OF REAL\na[1] <- 1";
    assert!(matches!(
        runtime_error(src),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_index_assignment_to_scalar() {
    let src = "DECLARE x : INTEGER\nx[1] <- 1";
    assert_eq!(
        runtime_error(src),
        RuntimeError::NotAnArray {
            name: "x".into(),
            got: "INTEGER".into()
        }
    );
}

#[test]
fn test_whole_array_assignment_forbidden() {
    let src = "\
DECLARE a : ARRAY[1:2] OF INTEGER
DECLARE b : ARRAY[1:2] OF INTEGER
a <- b";
    assert_eq!(runtime_error(src), RuntimeError::ArrayReassignment("a".into()));
}

#[test]
fn test_two_dimensional_array() {
    let src = "\
DECLARE grid : ARRAY[1:2, 1:3] OF INTEGER
grid[1, 2] <- 5
grid[2, 3] <- 7
OUTPUT grid[1, 2], grid[2, 3], grid[1, 1]";
    assert_eq!(run_ok(src), "5 7 0\n");
}

#[test]
fn test_two_dimensional_shape() {
    let src = "\
DECLARE grid : ARRAY[1:2, 1:3] OF INTEGER
OUTPUT LENGTH(grid), LENGTH(grid[1])";
    assert_eq!(run_ok(src), "2 3\n");
}

#[test]
fn test_two_dimensional_inner_bounds() {
    let src = "DECLARE grid : ARRAY[1:2, 1:3] OF INTEGER\ngrid[1, 4] <- 1";
    assert_eq!(
        runtime_error(src),
        RuntimeError::IndexOutOfBounds { index: 4, length: 3 }
    );
}

#[test]
fn test_two_indices_on_one_dimensional_array() {
    let src = "DECLARE a : ARRAY[1:3] OF INTEGER\nOUTPUT a[1, 2]";
    assert_eq!(
        runtime_error(src),
        RuntimeError::DimensionMismatch { dims: 1, indices: 2 }
    );
}

#[test]
fn test_row_indexing_then_element() {
    // Chained postfix indexing reaches into rows one level at a time
    let src = "\
DECLARE grid : ARRAY[1:2, 1:2] OF CHAR
grid[2, 1] <- 'x'
OUTPUT grid[2][1]";
    assert_eq!(run_ok(src), "x\n");
}

#[test]
fn test_array_passed_by_value() {
    // Mutating a parameter never touches the caller's array
    let src = "\
PROCEDURE clobber(a : ARRAY<INTEGER>)
a[1] <- 99
OUTPUT a[1]
ENDPROCEDURE
DECLARE nums : ARRAY[1:2] OF INTEGER
nums[1] <- 1
CALL clobber(nums)
OUTPUT nums[1]";
    assert_eq!(run_ok(src), "99\n1\n");
}

#[test]
fn test_two_dimensional_pass_by_value() {
    let src = "\
PROCEDURE clobber(g : ARRAY<ARRAY<INTEGER>>)
g[1, 1] <- 99
ENDPROCEDURE
DECLARE grid : ARRAY[1:2, 1:2] OF INTEGER
CALL clobber(grid)
OUTPUT grid[1, 1]";
    assert_eq!(run_ok(src), "0\n");
}

#[test]
fn test_array_of_strings_display() {
    let src = "\
DECLARE words : ARRAY[1:2] OF STRING
words[1] <- \"a\"
words[2] <- \"b\"
OUTPUT words";
    assert_eq!(run_ok(src), "[\"a\", \"b\"]\n");
}

#[test]
fn test_computed_bounds() {
    let src = "\
CONSTANT SIZE = 4
DECLARE a : ARRAY[1:SIZE] OF INTEGER
OUTPUT LENGTH(a)";
    assert_eq!(run_ok(src), "4\n");
}
