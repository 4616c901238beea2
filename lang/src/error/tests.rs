use super::*;
use crate::interpreter::RuntimeError;
use crate::lexer::LexError;
use crate::parser::ParseError;
use expect_test::expect;

fn pos(line: u32, column: u32) -> Position {
    Position::new(line, column)
}

#[test]
fn lex_error_display() {
    let err = EmberError::lex("unknown token '?'", pos(1, 5));
    let display = format!("{}", err);
    expect![[r#"LexError at 1:5: unknown token '?'"#]].assert_eq(&display);
}

#[test]
fn parse_error_display() {
    let err = EmberError::parse("')' expected", pos(3, 10));
    let display = format!("{}", err);
    expect![[r#"ParseError at 3:10: ')' expected"#]].assert_eq(&display);
}

#[test]
fn runtime_error_display() {
    let err = EmberError::runtime("division by zero", pos(2, 0));
    let display = format!("{}", err);
    expect![[r#"RuntimeError at 2:0: division by zero"#]].assert_eq(&display);
}

#[test]
fn error_kind_and_phase() {
    let lex = EmberError::lex("test", pos(1, 1));
    assert_eq!(lex.kind(), "LexError");
    assert_eq!(lex.phase(), Phase::Lex);

    let parse = EmberError::parse("test", pos(1, 1));
    assert_eq!(parse.kind(), "ParseError");
    assert_eq!(parse.phase(), Phase::Parse);

    let runtime = EmberError::runtime("test", pos(1, 1));
    assert_eq!(runtime.kind(), "RuntimeError");
    assert_eq!(runtime.phase(), Phase::Interpret);
}

#[test]
fn error_message_and_position() {
    let err = EmberError::parse("test message", pos(5, 10));
    assert_eq!(err.message(), "test message");
    assert_eq!(err.position(), pos(5, 10));
}

#[test]
fn phase_labels_and_exit_codes() {
    let labels: Vec<_> = Phase::ALL.iter().map(|phase| phase.label()).collect();
    assert_eq!(labels, vec!["LEXER", "PARSER", "INTERPRETER"]);

    let codes: Vec<_> = Phase::ALL.iter().map(|phase| phase.exit_code()).collect();
    assert_eq!(codes, vec![255, 254, 253]);

    assert_eq!(Phase::Parse.to_string(), "PARSER");
}

// Tests for From conversions

#[test]
fn from_lex_error_unknown_token() {
    let lex_err = LexError::UnknownToken {
        lexeme: "?".to_string(),
        position: pos(3, 7),
    };
    let ember_err: EmberError = lex_err.into();
    let display = format!("{}", ember_err);
    expect![[r#"LexError at 3:7: unknown token '?'"#]].assert_eq(&display);
}

#[test]
fn from_lex_error_unterminated_string() {
    let lex_err = LexError::UnterminatedString {
        position: pos(5, 10),
    };
    let ember_err: EmberError = lex_err.into();
    let display = format!("{}", ember_err);
    expect![[r#"LexError at 5:10: unterminated string literal"#]].assert_eq(&display);
}

#[test]
fn from_lex_error_invalid_float() {
    let lex_err = LexError::InvalidFloat {
        lexeme: "12.".to_string(),
        position: pos(1, 0),
    };
    let ember_err: EmberError = lex_err.into();
    let display = format!("{}", ember_err);
    expect![[r#"LexError at 1:0: invalid floating point number '12.'"#]].assert_eq(&display);
}

#[test]
fn from_parse_error() {
    let parse_err = ParseError::new("unexpected end of input", pos(10, 15));
    let ember_err: EmberError = parse_err.into();
    let display = format!("{}", ember_err);
    expect![[r#"ParseError at 10:15: unexpected end of input"#]].assert_eq(&display);
}

#[test]
fn from_runtime_error() {
    let runtime_err = RuntimeError::NonIntegralOperand {
        op: "&",
        position: pos(1, 4),
    };
    let ember_err: EmberError = runtime_err.into();
    let display = format!("{}", ember_err);
    expect![[r#"RuntimeError at 1:4: non-integral operand for bitwise operator '&'"#]]
        .assert_eq(&display);
}

// Diagnostics

#[test]
fn diagnostic_display() {
    let diagnostic = Diagnostic {
        phase: Phase::Interpret,
        file: "calc.em".to_string(),
        position: pos(1, 2),
        message: "division by zero".to_string(),
    };
    expect![[r#"[INTERPRETER ERROR]: calc.em (1:2): division by zero"#]]
        .assert_eq(&diagnostic.to_string());
}

#[test]
fn diagnostics_start_empty() {
    let diagnostics = Diagnostics::new("<eval>");
    assert!(diagnostics.is_empty());
    assert_eq!(diagnostics.len(), 0);
    assert_eq!(diagnostics.file(), "<eval>");
    assert_eq!(diagnostics.first_failed_phase(), None);
    for phase in Phase::ALL {
        assert!(!diagnostics.has_errors(phase));
    }
}

#[test]
fn diagnostics_are_kept_per_phase() {
    let mut diagnostics = Diagnostics::new("input.em");
    diagnostics.push(Phase::Interpret, pos(4, 1), "modulo by zero");
    diagnostics.record(&EmberError::parse("')' expected", pos(2, 3)));

    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.has_errors(Phase::Parse));
    assert!(diagnostics.has_errors(Phase::Interpret));
    assert!(!diagnostics.has_errors(Phase::Lex));
    assert_eq!(diagnostics.first_failed_phase(), Some(Phase::Parse));

    let parse = diagnostics.for_phase(Phase::Parse);
    assert_eq!(parse.len(), 1);
    assert_eq!(parse[0].file, "input.em");
    assert_eq!(parse[0].message, "')' expected");
}

#[test]
fn diagnostics_iterate_in_pipeline_order() {
    let mut diagnostics = Diagnostics::new("a.em");
    diagnostics.push(Phase::Interpret, pos(3, 0), "third");
    diagnostics.push(Phase::Lex, pos(1, 0), "first");
    diagnostics.push(Phase::Parse, pos(2, 0), "second");

    let rendered: Vec<_> = diagnostics.iter().map(|d| d.to_string()).collect();
    expect![[r#"
        [
            "[LEXER ERROR]: a.em (1:0): first",
            "[PARSER ERROR]: a.em (2:0): second",
            "[INTERPRETER ERROR]: a.em (3:0): third",
        ]
    "#]]
    .assert_debug_eq(&rendered);
}

#[test]
fn separate_collectors_do_not_share_state() {
    let mut first = Diagnostics::new("one.em");
    let second = Diagnostics::new("two.em");
    first.push(Phase::Lex, pos(1, 0), "boom");

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}
