use expect_test::{expect, Expect};

use super::*;
use crate::lexer::lex;

fn parse_str(input: &str) -> ParseResult<Ast> {
    let tokens = lex(input).unwrap();
    parse(&tokens)
}

fn parse_program_str(input: &str) -> ParseResult<Program> {
    let tokens = lex(input).unwrap();
    parse_program(&tokens)
}

fn check_ast(input: &str, expect: Expect) {
    let ast = parse_str(input).unwrap();
    expect.assert_eq(&ast.to_string());
}

fn check_error(input: &str, expect: Expect) {
    let err = parse_str(input).unwrap_err();
    expect.assert_eq(&err.to_string());
}

#[test]
fn parse_integer() {
    check_ast("42", expect![[r#"42"#]]);
}

#[test]
fn parse_float() {
    check_ast("2.5", expect![[r#"2.5"#]]);
    check_ast("3.0", expect![[r#"3.0"#]]);
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    check_ast("1 + 2 * 3", expect![[r#"(+ 1 (* 2 3))"#]]);
    check_ast("1 * 2 + 3", expect![[r#"(+ (* 1 2) 3)"#]]);
}

#[test]
fn parentheses_override_precedence() {
    check_ast("(1 + 2) * 3", expect![[r#"(* (+ 1 2) 3)"#]]);
    check_ast("((((7))))", expect![[r#"7"#]]);
}

#[test]
fn binary_operators_are_left_associative() {
    check_ast("10 - 4 - 3", expect![[r#"(- (- 10 4) 3)"#]]);
    check_ast("100 / 10 / 5", expect![[r#"(/ (/ 100 10) 5)"#]]);
    check_ast("1 << 2 << 3", expect![[r#"(<< (<< 1 2) 3)"#]]);
}

#[test]
fn xor_shares_the_multiplicative_tier() {
    check_ast("1 + 6 ^ 3", expect![[r#"(+ 1 (^ 6 3))"#]]);
    check_ast("6 ^ 3 * 2", expect![[r#"(* (^ 6 3) 2)"#]]);
}

#[test]
fn bitwise_and_shift_tiers() {
    check_ast("1 | 2 & 3", expect![[r#"(| 1 (& 2 3))"#]]);
    check_ast("1 & 2 << 3", expect![[r#"(& 1 (<< 2 3))"#]]);
    check_ast("1 << 2 + 3", expect![[r#"(<< 1 (+ 2 3))"#]]);
}

#[test]
fn comparison_binds_loosest() {
    check_ast("1 + 2 == 3", expect![[r#"(== (+ 1 2) 3)"#]]);
    check_ast("1 | 2 < 4", expect![[r#"(< (| 1 2) 4)"#]]);
    check_ast("1 < 2 != 0", expect![[r#"(!= (< 1 2) 0)"#]]);
}

#[test]
fn prefix_operators() {
    check_ast("-3", expect![[r#"(- 3)"#]]);
    check_ast("- -3", expect![[r#"(- (- 3))"#]]);
    check_ast("!~+1", expect![[r#"(! (~ (+ 1)))"#]]);
    check_ast("-2 * 3", expect![[r#"(* (- 2) 3)"#]]);
    check_ast("-(2 * 3)", expect![[r#"(- (* 2 3))"#]]);
}

#[test]
fn empty_input_is_an_empty_tree() {
    let ast = parse_str("").unwrap();
    assert!(ast.is_empty());
    assert_eq!(ast.to_string(), "()");

    let ast = parse_str("  # only a comment").unwrap();
    assert_eq!(ast, Ast::empty());
}

#[test]
fn nodes_carry_operator_positions() {
    let ast = parse_str("1 +\n  2 * 3").unwrap();
    let root = ast.root.unwrap();
    assert_eq!(root.position, Position::new(1, 2));

    match root.kind {
        ExprKind::Infix { left, op, right } => {
            assert_eq!(op, InfixOp::Add);
            assert_eq!(left.position, Position::new(1, 0));
            assert_eq!(right.position, Position::new(2, 4));
        }
        other => panic!("expected infix node, got {:?}", other),
    }
}

#[test]
fn parse_builds_expected_tree() {
    let ast = parse_str("1 - 2").unwrap();
    assert_eq!(
        ast,
        Ast::new(Expr::infix(
            Expr::number(Number::Int(1), Position::new(1, 0)),
            InfixOp::Subtract,
            Expr::number(Number::Int(2), Position::new(1, 4)),
            Position::new(1, 2),
        ))
    );
}

#[test]
fn missing_operand_reports_end_of_input() {
    check_error("1 +", expect![[r#"unexpected end of input at 1:2"#]]);
    check_error("-", expect![[r#"unexpected end of input at 1:0"#]]);
}

#[test]
fn missing_close_paren() {
    check_error("(1 + 2", expect![[r#"')' expected at 1:5"#]]);
    check_error("(1 2)", expect![[r#"')' expected at 1:3"#]]);
}

#[test]
fn unknown_primary_token() {
    check_error(")", expect![[r#"unknown primary token RIGHT_PAREN at 1:0"#]]);
    check_error("1 * print", expect![[r#"unknown primary token KW_PRINT at 1:4"#]]);
    check_error("\"text\"", expect![[r#"unknown primary token STRING at 1:0"#]]);
}

#[test]
fn trailing_tokens_are_rejected() {
    check_error("1 2", expect![[r#"unexpected token INTEGER after expression at 1:2"#]]);
    check_error("(1) )", expect![[r#"unexpected token RIGHT_PAREN after expression at 1:4"#]]);
}

#[test]
fn integer_literal_out_of_range() {
    check_error(
        "1 + 99999999999999999999",
        expect![[r#"integer literal '99999999999999999999' out of range at 1:4"#]],
    );
}

#[test]
fn largest_integer_literal_parses() {
    let ast = parse_str("9223372036854775807").unwrap();
    assert_eq!(ast.root.unwrap().kind, ExprKind::Number(Number::Int(i64::MAX)));
}

#[test]
fn parse_program_statements() {
    let program = parse_program_str("print 1;\n2 + 3\nprint 4.5").unwrap();
    expect![[r#"
        (print 1)
        (+ 2 3)
        (print 4.5)"#]]
    .assert_eq(&program.to_string());
    assert_eq!(program.statements[0].position(), Position::new(1, 0));
    assert_eq!(program.statements[2].position(), Position::new(3, 0));
}

#[test]
fn parse_program_separators() {
    let err = parse_program_str("1 2;;").unwrap_err();
    assert_eq!(err.message, "unknown primary token SEMICOLON");

    let program = parse_program_str("1 2").unwrap();
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn parse_program_empty() {
    let program = parse_program_str("").unwrap();
    assert!(program.is_empty());
    assert_eq!(program.to_string(), "");
}

#[test]
fn print_requires_an_expression() {
    let err = parse_program_str("print").unwrap_err();
    assert_eq!(err, ParseError::new("unexpected end of input", Position::new(1, 0)));
}

fn nested_parens(depth: usize) -> String {
    format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn nesting_up_to_the_limit_parses() {
    let ast = parse_str(&nested_parens(MAX_NESTING_DEPTH - 1)).unwrap();
    assert_eq!(ast.root.unwrap().kind, ExprKind::Number(Number::Int(1)));

    let prefixes = format!("{}1", "-".repeat(MAX_NESTING_DEPTH - 1));
    assert!(parse_str(&prefixes).is_ok());
}

#[test]
fn nesting_past_the_limit_is_an_error() {
    check_error(
        &nested_parens(MAX_NESTING_DEPTH),
        expect![[r#"expression nested too deeply at 1:256"#]],
    );
    check_error(
        &format!("{}1", "-".repeat(MAX_NESTING_DEPTH)),
        expect![[r#"expression nested too deeply at 1:256"#]],
    );
}

#[test]
fn very_deep_nesting_fails_without_overflowing() {
    let err = parse_str(&nested_parens(100_000)).unwrap_err();
    assert_eq!(err.message, "expression nested too deeply");

    let err = parse_program_str(&format!("print {}1", "~".repeat(100_000))).unwrap_err();
    assert_eq!(err.message, "expression nested too deeply");
}
