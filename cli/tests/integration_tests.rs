use std::process::{Command, Output};

fn calc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_calc"))
        .args(args)
        .output()
        .expect("failed to run calc")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn add_dispatches_and_prints_the_sum() {
    let output = calc(&["add", "2", "3"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "5");
}

#[test]
fn subtract_dispatches_and_prints_the_difference() {
    let output = calc(&["subtract", "9", "4"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "5");
}

#[test]
fn bad_integer_exits_with_a_usage_error() {
    let output = calc(&["add", "2", "x"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("is not a valid integer"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn missing_operation_is_a_hard_error() {
    let output = calc(&[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("requires a subcommand"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn missing_operand_is_a_usage_error() {
    let output = calc(&["add", "2"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn divide_by_zero_fails_with_the_failure_code() {
    let output = calc(&["divide", "5", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("cannot divide by zero"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn truncated_division_warns_but_succeeds() {
    let output = calc(&["divide", "7", "2"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "3");
    assert!(
        stderr(&output).contains("warning: result is truncated"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn help_lists_the_operations() {
    let output = calc(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    let help = stdout(&output);
    for operation in ["add", "subtract", "multiply", "divide"] {
        assert!(help.contains(operation), "help output: {help}");
    }
    assert!(help.contains("operation"), "help output: {help}");
}

#[test]
fn subcommand_help_shows_operand_arguments() {
    let output = calc(&["add", "--help"]);
    assert_eq!(output.status.code(), Some(0));
    let help = stdout(&output);
    assert!(help.contains("The first number"), "help output: {help}");
    assert!(help.contains("The second number"), "help output: {help}");
}
